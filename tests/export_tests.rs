//! End-to-end export tests over in-memory scaffold sources.

mod common;

use std::sync::Arc;

use common::*;
use playground_export::bundle::{CollisionPolicy, EntityKind};
use playground_export::config::MissingPreparePolicy;
use playground_export::exporter::{EntityFailure, ExportError, ExportOptions, ProjectExporter};
use playground_export::formatter::{BuiltinFormatter, CodeFormatter, FormatError};
use playground_export::writer::{DirectoryPackageWriter, JsonPackageWriter, MemoryPackageWriter};
use playground_transport::{DirectoryScaffoldSource, StaticScaffoldSource};
use playground_types::{ScriptTemplate, TransactionTemplate};
use tempfile::TempDir;

const FOO_TEST_FILE: &str = r#"import path from "path";
import * as t from "@onflow/types";
import {
  init,
  emulator,
  getAccountAddress,
  deployContract,
  getContractCode,
  getTransactionCode,
  getScriptCode,
  executeScript,
  sendTransaction
} from "flow-js-testing";

jest.setTimeout(10000);

describe("Playground project foo-project", () => {
  beforeEach(async () => {
    const basePath = path.resolve(__dirname, "../cadence");
    const port = 8080;
    await init(basePath, { port });
    return emulator.start(port, false);
  });

  afterEach(async () => {
    return emulator.stop();
  });

  test("Deploy Foo", async () => {
    const Alice = await getAccountAddress("Alice");
    const to = Alice;
    let code = await getContractCode({ name: "Foo" });
    const deployed = await deployContract({ to, name: "Foo", code });
    expect(deployed).toBeDefined();
  });
});
"#;

#[tokio::test]
async fn test_contract_only_project_exports_six_files() {
    let mut writer = MemoryPackageWriter::new();
    let artifact = static_exporter()
        .export(&contract_only_project(), &mut writer)
        .await
        .unwrap();

    let paths: Vec<&str> = writer.files().keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "cadence/contracts/Foo.cdc",
            "test/README.md",
            "test/babel.config.json",
            "test/index.test.js",
            "test/jest.config.json",
            "test/package.json",
        ]
    );
    assert_eq!(artifact.files, 6);
    assert!(writer.is_finalized());

    let files = writer.files();
    assert_eq!(files["cadence/contracts/Foo.cdc"], "pub contract Foo { }");
    assert_eq!(files["test/README.md"], SCAFFOLD_README);
    assert_eq!(files["test/index.test.js"], FOO_TEST_FILE);
}

#[tokio::test]
async fn test_export_is_deterministic() {
    let exporter = static_exporter();
    let project = full_project();
    let first = exporter.build_bundle(&project).await.unwrap();
    let second = exporter.build_bundle(&project).await.unwrap();
    assert_eq!(
        first.get("test/index.test.js"),
        second.get("test/index.test.js")
    );
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_full_project_bundle() {
    let bundle = static_exporter().build_bundle(&full_project()).await.unwrap();

    let paths: Vec<&str> = bundle.paths().collect();
    assert_eq!(bundle.len(), 10);
    for expected in [
        "cadence/contracts/ExampleToken.cdc",
        "cadence/contracts/Marketplace.cdc",
        "cadence/transactions/Transfer_Tokens.cdc",
        "cadence/transactions/Setup.cdc",
        "cadence/scripts/Get_Balance.cdc",
    ] {
        assert!(paths.contains(&expected), "missing {}", expected);
    }

    let test_file = bundle.get("test/index.test.js").unwrap();
    assert_no_markers(test_file);
    assert_in_order(
        test_file,
        &[
            "test(\"Deploy ExampleToken\"",
            "test(\"Deploy Marketplace\"",
            "test(\"Transfer Tokens\"",
            "test(\"Setup\"",
            "test(\"Get Balance\"",
        ],
    );
}

#[tokio::test]
async fn test_full_project_fragments() {
    let test_file = static_exporter()
        .render_test_file(&full_project())
        .await
        .unwrap();

    // Marketplace: deployed by Bob, imports from Alice, rewrites getAccount(0x01)
    assert_in_order(
        &test_file,
        &[
            "test(\"Deploy Marketplace\"",
            "const Alice = await getAccountAddress(\"Alice\");",
            "const Bob = await getAccountAddress(\"Bob\");",
            "const addressMap = {",
            "ExampleToken: Alice",
            "const to = Bob;",
            "getContractCode({ name: \"Marketplace\", addressMap })",
            "code = code.replace(/(?:getAccount\\(\\s*)(0x[0-9a-fA-F]+)(?:\\s*\\))/g, (_, match) => {",
            "const accounts = { \"0x01\": Alice };",
            "return `getAccount(${name})`;",
            "deployContract({ to, name: \"Marketplace\", code })",
        ],
    );

    // Transfer: one selected signer, typed arguments
    assert_in_order(
        &test_file,
        &[
            "test(\"Transfer Tokens\"",
            "const Charlie = await getAccountAddress(\"Charlie\");",
            "getTransactionCode({ name: \"Transfer_Tokens\", addressMap })",
            "const signers = [Bob];",
            "const args = [[1.0, t.UFix64], [\"0xf8d6e0586b0a20c7\", t.Address]];",
            "sendTransaction({ code, signers, args })",
        ],
    );

    // Setup: no selection, two prepare() parameters padded from the defaults
    assert_in_order(
        &test_file,
        &[
            "test(\"Setup\"",
            "getTransactionCode({ name: \"Setup\" })",
            "const signers = [Alice, Bob];",
            "sendTransaction({ code, signers })",
        ],
    );

    assert_in_order(
        &test_file,
        &[
            "test(\"Get Balance\"",
            "getScriptCode({ name: \"Get_Balance\", addressMap })",
            "const args = [[\"0xf8d6e0586b0a20c7\", t.Address], [undefined, t.Array(t.UInt64)]];",
            "executeScript({ code, args })",
        ],
    );
}

fn duplicate_scripts() -> playground_types::Project {
    let mut project = contract_only_project();
    project.script_templates = vec![
        ScriptTemplate {
            title: "Read".into(),
            script: "pub fun main(): Int { return 1 }".into(),
        },
        ScriptTemplate {
            title: "Read".into(),
            script: "pub fun main(): Int { return 2 }".into(),
        },
    ];
    project
}

#[tokio::test]
async fn test_collision_overwrite() {
    let bundle = static_exporter()
        .build_bundle(&duplicate_scripts())
        .await
        .unwrap();
    assert_eq!(
        bundle.get("cadence/scripts/Read.cdc"),
        Some("pub fun main(): Int { return 2 }")
    );
    assert!(bundle.get("cadence/scripts/Read_2.cdc").is_none());
}

#[tokio::test]
async fn test_collision_suffix() {
    let exporter = static_exporter().with_options(ExportOptions {
        collision_policy: CollisionPolicy::Suffix,
        ..ExportOptions::default()
    });
    let bundle = exporter.build_bundle(&duplicate_scripts()).await.unwrap();
    assert_eq!(
        bundle.get("cadence/scripts/Read.cdc"),
        Some("pub fun main(): Int { return 1 }")
    );
    assert_eq!(
        bundle.get("cadence/scripts/Read_2.cdc"),
        Some("pub fun main(): Int { return 2 }")
    );
    let test_file = bundle.get("test/index.test.js").unwrap();
    assert_in_order(
        test_file,
        &[
            "getScriptCode({ name: \"Read\" })",
            "getScriptCode({ name: \"Read_2\" })",
        ],
    );
}

#[tokio::test]
async fn test_collision_reject_writes_nothing() {
    let exporter = static_exporter().with_options(ExportOptions {
        collision_policy: CollisionPolicy::Reject,
        ..ExportOptions::default()
    });
    let mut writer = MemoryPackageWriter::new();
    let err = exporter
        .export(&duplicate_scripts(), &mut writer)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::Entity {
            kind: EntityKind::Script,
            cause: EntityFailure::Collision(_),
            ..
        }
    ));
    assert!(writer.files().is_empty());
    assert!(!writer.is_finalized());
}

#[tokio::test]
async fn test_missing_prepare_fail_policy_writes_nothing() {
    let mut project = contract_only_project();
    project.transaction_templates = vec![TransactionTemplate {
        title: "No Signers".into(),
        script: "transaction { execute { log(\"hi\") } }".into(),
        signers: vec![],
    }];

    let lenient = static_exporter().render_test_file(&project).await.unwrap();
    assert!(lenient.contains("sendTransaction({ code })"));
    assert!(!lenient.contains("const signers"));

    let strict = static_exporter().with_options(ExportOptions {
        missing_prepare: MissingPreparePolicy::Fail,
        ..ExportOptions::default()
    });
    let mut writer = MemoryPackageWriter::new();
    let err = strict.export(&project, &mut writer).await.unwrap_err();
    assert!(err.to_string().starts_with("transaction 'No Signers'"));
    assert!(writer.files().is_empty());
}

#[tokio::test]
async fn test_scaffold_failure_aborts_export() {
    let exporter = ProjectExporter::new(
        Arc::new(StaticScaffoldSource::new().with_file("README.md", "# only one")),
        Arc::new(BuiltinFormatter),
    );
    let mut writer = MemoryPackageWriter::new();
    let err = exporter
        .export(&contract_only_project(), &mut writer)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Scaffold(_)));
    assert!(err.to_string().contains("package.json"));
    assert!(writer.files().is_empty());
}

struct RejectingFormatter;

#[async_trait::async_trait]
impl CodeFormatter for RejectingFormatter {
    async fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::External("syntax error".into()))
    }

    fn name(&self) -> &str {
        "rejecting"
    }
}

#[tokio::test]
async fn test_formatter_failure_is_fatal_for_the_entity() {
    let exporter = ProjectExporter::new(Arc::new(static_scaffold()), Arc::new(RejectingFormatter));
    let err = exporter
        .build_bundle(&contract_only_project())
        .await
        .unwrap_err();
    match err {
        ExportError::Entity { kind, title, cause } => {
            assert_eq!(kind, EntityKind::Contract);
            assert_eq!(title, "Foo");
            assert!(matches!(cause, EntityFailure::Format(FormatError::External(_))));
        }
        other => panic!("expected entity failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_directory_export_from_scaffold_dir() {
    let dir = TempDir::new().unwrap();
    let scaffold_root = write_scaffold_dir(dir.path());
    let exporter = ProjectExporter::new(
        Arc::new(DirectoryScaffoldSource::new(scaffold_root)),
        Arc::new(BuiltinFormatter),
    );

    let out = dir.path().join("export");
    let mut writer = DirectoryPackageWriter::new(&out);
    let artifact = exporter.export(&full_project(), &mut writer).await.unwrap();

    assert_eq!(artifact.files, 10);
    assert_eq!(
        std::fs::read_to_string(out.join("test/README.md")).unwrap(),
        SCAFFOLD_README
    );
    let test_file = std::fs::read_to_string(out.join("test/index.test.js")).unwrap();
    assert!(test_file.contains("test(\"Get Balance\""));
    assert!(out.join("cadence/transactions/Transfer_Tokens.cdc").exists());
}

#[tokio::test]
async fn test_json_export() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("export.json");
    let mut writer = JsonPackageWriter::new(&target);
    static_exporter()
        .export(&contract_only_project(), &mut writer)
        .await
        .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    let files = parsed["files"].as_object().unwrap();
    assert_eq!(files.len(), 6);
    assert_eq!(files["test/index.test.js"], FOO_TEST_FILE);
}

#[tokio::test]
async fn test_empty_scaffold_for_render() {
    let exporter = ProjectExporter::new(
        Arc::new(StaticScaffoldSource::empty()),
        Arc::new(BuiltinFormatter),
    );
    let bundle = exporter.build_bundle(&contract_only_project()).await.unwrap();
    assert_eq!(bundle.get("test/README.md"), Some(""));
    assert_eq!(bundle.get("test/index.test.js"), Some(FOO_TEST_FILE));
}
