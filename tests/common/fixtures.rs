//! Project snapshots and scaffold sources for tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use playground_export::formatter::BuiltinFormatter;
use playground_export::ProjectExporter;
use playground_transport::scaffold::{
    BABEL_CONFIG_PATH, JEST_CONFIG_PATH, PACKAGE_JSON_PATH, README_PATH,
};
use playground_transport::StaticScaffoldSource;
use playground_types::{Account, Project, ScriptTemplate, TransactionTemplate};

pub const SCAFFOLD_README: &str = "# Playground tests\n\nRun `npm test`.\n";

const SCAFFOLD_FILES: [(&str, &str); 4] = [
    (README_PATH, SCAFFOLD_README),
    (PACKAGE_JSON_PATH, "{\n  \"name\": \"playground-tests\"\n}\n"),
    (BABEL_CONFIG_PATH, "{\n  \"presets\": [\"@babel/preset-env\"]\n}\n"),
    (JEST_CONFIG_PATH, "{\n  \"testEnvironment\": \"node\"\n}\n"),
];

/// In-memory scaffold with realistic contents.
pub fn static_scaffold() -> StaticScaffoldSource {
    SCAFFOLD_FILES
        .iter()
        .fold(StaticScaffoldSource::new(), |source, (path, contents)| {
            source.with_file(path, contents)
        })
}

/// Write the scaffold files into `dir` for directory-backed exports.
pub fn write_scaffold_dir(dir: &Path) -> PathBuf {
    let root = dir.join("scaffold");
    std::fs::create_dir_all(&root).expect("create scaffold dir");
    for (path, contents) in SCAFFOLD_FILES {
        std::fs::write(root.join(path), contents).expect("write scaffold file");
    }
    root
}

/// Exporter over the static scaffold with the builtin formatter.
pub fn static_exporter() -> ProjectExporter {
    ProjectExporter::new(Arc::new(static_scaffold()), Arc::new(BuiltinFormatter))
}

/// One account deploying `contract Foo { }`, nothing else.
pub fn contract_only_project() -> Project {
    Project {
        id: "foo-project".into(),
        accounts: vec![
            Account {
                address: "0x01".into(),
                draft_code: "pub contract Foo { }".into(),
            },
            Account {
                address: "0x02".into(),
                draft_code: String::new(),
            },
        ],
        transaction_templates: vec![],
        script_templates: vec![],
    }
}

/// A fungible-token style project touching every fragment kind.
pub fn full_project() -> Project {
    Project {
        id: "token".into(),
        accounts: vec![
            Account {
                address: "0x01".into(),
                draft_code: r#"pub contract ExampleToken {
    pub var totalSupply: UFix64
    init() { self.totalSupply = 1000.0 }
}"#
                .into(),
            },
            Account {
                address: "0x02".into(),
                draft_code: r#"import ExampleToken from 0x01

pub contract Marketplace {
    init() {
        let owner = getAccount(0x01)
    }
}"#
                .into(),
            },
        ],
        transaction_templates: vec![
            TransactionTemplate {
                title: "Transfer Tokens".into(),
                script: r#"import ExampleToken from 0x01

transaction(amount: UFix64, to: Address) {
    prepare(signer: AuthAccount) {
        let recipient = getAccount(0x03)
    }
}"#
                .into(),
                signers: vec!["0x02".into()],
            },
            TransactionTemplate {
                title: "Setup".into(),
                script: "transaction {\n    prepare(a: AuthAccount, b: AuthAccount) {}\n}".into(),
                signers: vec![],
            },
        ],
        script_templates: vec![ScriptTemplate {
            title: "Get Balance".into(),
            script: r#"import ExampleToken from 0x01

pub fun main(account: Address, ids: [UInt64]): UFix64 {
    return 1.0
}"#
            .into(),
        }],
    }
}

/// Serialize `project` to `<dir>/project.json`.
pub fn write_project(dir: &Path, project: &Project) -> PathBuf {
    let path = dir.join("project.json");
    std::fs::write(&path, serde_json::to_string_pretty(project).expect("serialize project"))
        .expect("write project");
    path
}
