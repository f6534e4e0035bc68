//! Constant content for the files written by the emitter.

/// Formatter configuration (`.prettierrc`)
pub const PRETTIERRC: &str = r#"{
  "semi": true,
  "singleQuote": false,
  "trailingComma": "all",
  "printWidth": 100,
  "tabWidth": 2
}
"#;

/// Flat linter configuration (`eslint.config.mjs`)
pub const ESLINT_CONFIG: &str = r#"// @ts-check

import eslint from "@eslint/js";
import tseslint from "typescript-eslint";
import prettier from "eslint-config-prettier";

export default tseslint.config(
  { ignores: ["dist/"] },
  eslint.configs.recommended,
  tseslint.configs.recommended,
  prettier,
);
"#;

/// Editor settings (`.vscode/settings.json`)
pub const VSCODE_SETTINGS: &str = r#"{
  "editor.formatOnSave": true,
  "editor.defaultFormatter": "esbenp.prettier-vscode",
  "editor.codeActionsOnSave": {
    "source.fixAll.eslint": "explicit"
  },
  "typescript.tsdk": "node_modules/typescript/lib"
}
"#;

/// Ignore rules (`.gitignore`)
pub const GITIGNORE: &str = r#"# Dependencies
node_modules/

# Build output
dist/
*.tsbuildinfo

# Logs
*.log
npm-debug.log*

# Environment
.env
.env.*

# Coverage
coverage/
"#;

/// Example entry point (`src/index.ts`)
pub const INDEX_TS: &str = r#"export function greet(name: string): string {
  return `Hello, ${name}!`;
}

console.log(greet("world"));
"#;
