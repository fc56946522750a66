//! Boilerplate renderers.
//!
//! Pure functions from a [`ServerSpec`] to file contents; the writer
//! decides where they land on disk.

use mcpforge_core::ServerSpec;
use serde_json::{json, Map, Value};

/// TypeScript skeleton for the generated server.
///
/// `{class_name}` and `{server_name}` are substituted; every other brace
/// belongs to the emitted TypeScript.
const SOURCE_STUB: &str = r#"#!/usr/bin/env node
import { Server } from '@modelcontextprotocol/sdk/server/index.js';
import { StdioServerTransport } from '@modelcontextprotocol/sdk/server/stdio.js';
import {
  CallToolRequestSchema,
  ListToolsRequestSchema,
  McpError,
  ErrorCode
} from '@modelcontextprotocol/sdk/types.js';

class {class_name} {
  private server: Server;

  constructor() {
    this.server = new Server(
      {
        name: '{server_name}',
        version: '1.0.0'
      },
      {
        capabilities: {
          resources: {},
          tools: {}
        }
      }
    );

    this.setupToolHandlers();

    this.server.onerror = (error) => console.error('[{server_name} Error]', error);
    process.on('SIGINT', async () => {
      await this.server.close();
      process.exit(0);
    });
  }

  private setupToolHandlers() {
    this.server.setRequestHandler(ListToolsRequestSchema, async () => ({
      tools: [
        {
          name: 'hello',
          description: 'Say hello',
          inputSchema: {
            type: 'object',
            properties: {
              name: { type: 'string', description: 'Your name' }
            },
            required: ['name']
          }
        }
      ]
    }));

    this.server.setRequestHandler(CallToolRequestSchema, async (request) => {
      if (request.params.name === 'hello') {
        const name = request.params.arguments?.name;
        return { content: [{ type: 'text', text: `Hello, ${name}!` }] };
      }
      throw new McpError(ErrorCode.MethodNotFound, `Unknown tool: ${request.params.name}`);
    });
  }

  async run() {
    const transport = new StdioServerTransport();
    await this.server.connect(transport);
    console.error('{server_name} running on stdio');
  }
}

const server = new {class_name}();
server.run().catch(console.error);
"#;

/// Render the `src/index.ts` stub.
///
/// The class name comes from the identifier normalizer; the raw server
/// name is embedded verbatim in string positions.
pub fn render_source_stub(spec: &ServerSpec) -> String {
    SOURCE_STUB
        .replace("{class_name}", &spec.type_name())
        .replace("{server_name}", &spec.name)
}

/// Render `package.json`.
///
/// The `name` field and the `bin` entry both use the canonical package
/// name, so they cannot drift apart.
pub fn render_manifest(spec: &ServerSpec) -> Value {
    let package_name = spec.package_name();
    json!({
        "name": package_name,
        "version": "1.0.0",
        "description": "MCP server",
        "license": "MIT",
        "author": "",
        "type": "module",
        "private": false,
        "bin": {
            (&package_name): "build/index.js"
        },
        "files": [
            "build"
        ],
        "publishConfig": {
            "access": "public"
        },
        "engines": {
            "node": ">=14"
        },
        "scripts": {
            "build": "tsc && node -e \"require('fs').chmodSync('build/index.js', '755')\"",
            "watch": "tsc --watch",
            "inspector": "npx @modelcontextprotocol/inspector build/index.js",
            "start": "node build/index.js"
        },
        "dependencies": {
            "@modelcontextprotocol/sdk": "1.8.0",
            "@types/node-fetch": "^2.6.12",
            "node-fetch": "^3.3.2",
            "zod-to-json-schema": "^3.23.5"
        },
        "devDependencies": {
            "@types/node": "^22.13.10",
            "typescript": "^5.8.2",
            "zod": "^3.24.2"
        }
    })
}

/// Render the MCP client configuration snippet (`mcp.json`).
///
/// This is where the collected launch command, arguments, and environment
/// variables end up; users paste it into their client configuration.
pub fn render_server_config(spec: &ServerSpec) -> Value {
    let mut env = Map::new();
    for (key, value) in &spec.env {
        env.insert(key.clone(), Value::String(value.clone()));
    }

    json!({
        "mcpServers": {
            (&spec.name): {
                "command": spec.command,
                "args": spec.args,
                "env": env
            }
        }
    })
}

/// Render `tsconfig.json`.
pub fn render_compiler_config() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "Node16",
            "moduleResolution": "Node16",
            "outDir": "./build",
            "rootDir": "./src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true
        },
        "include": ["src/**/*"],
        "exclude": ["node_modules"]
    })
}

/// Render `.gitignore`.
pub fn render_ignore_file() -> &'static str {
    "\
# Dependency directories
node_modules/

# Build output
build/

# Logs
logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*
lerna-debug.log*

# Diagnostic reports (https://nodejs.org/api/report.html)
report.[0-9]*.[0-9]*.[0-9]*.[0-9]*.json

# Runtime data
pids
*.pid
*.seed
*.pid.lock

# Optional eslint cache
.eslintcache

# Optional REPL history
.node_repl_history

# dotenv environment variables file
.env*
!.env.example
"
}
