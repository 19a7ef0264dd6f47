//! Project export orchestration.
//!
//! One export is strictly sequential: scaffold files first, then every
//! account, transaction template and script template in project order. The
//! first fatal error aborts the export before anything reaches the package
//! writer.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use playground_extractor::{extract_signer_count, ExtractError, SourceFacts};
use playground_resolver::pad_to_signer_count;
use playground_transport::{fetch_scaffold, ScaffoldSource, StaticScaffoldSource};
use playground_types::Project;

use crate::assemble::{self, CaseKind, TestCase};
use crate::bundle::{
    file_stem, slugify, source_path, BundleError, CollisionPolicy, EntityKind, ExportBundle,
    TEST_DIR, TEST_FILE_PATH,
};
use crate::config::{ExportConfig, MissingPreparePolicy};
use crate::formatter::{CodeFormatter, FormatError};
use crate::template::TemplateError;
use crate::writer::{PackageArtifact, PackageWriter};

/// Why generating one entity (or the combined file) failed.
#[derive(Debug)]
pub enum EntityFailure {
    MissingPrepare(ExtractError),
    Template(TemplateError),
    Format(FormatError),
    Collision(BundleError),
}

impl fmt::Display for EntityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityFailure::MissingPrepare(e) => write!(f, "{}", e),
            EntityFailure::Template(e) => write!(f, "template error: {}", e),
            EntityFailure::Format(e) => write!(f, "formatting failed: {}", e),
            EntityFailure::Collision(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EntityFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EntityFailure::MissingPrepare(e) => Some(e),
            EntityFailure::Template(e) => Some(e),
            EntityFailure::Format(e) => Some(e),
            EntityFailure::Collision(e) => Some(e),
        }
    }
}

impl From<ExtractError> for EntityFailure {
    fn from(e: ExtractError) -> Self {
        EntityFailure::MissingPrepare(e)
    }
}

impl From<TemplateError> for EntityFailure {
    fn from(e: TemplateError) -> Self {
        EntityFailure::Template(e)
    }
}

impl From<FormatError> for EntityFailure {
    fn from(e: FormatError) -> Self {
        EntityFailure::Format(e)
    }
}

impl From<BundleError> for EntityFailure {
    fn from(e: BundleError) -> Self {
        EntityFailure::Collision(e)
    }
}

/// First fatal failure of an export.
#[derive(Debug)]
pub enum ExportError {
    Scaffold(anyhow::Error),
    Entity {
        kind: EntityKind,
        title: String,
        cause: EntityFailure,
    },
    TestFile(EntityFailure),
    Package(anyhow::Error),
}

impl ExportError {
    fn entity(kind: EntityKind, title: &str, cause: impl Into<EntityFailure>) -> Self {
        ExportError::Entity {
            kind,
            title: title.to_string(),
            cause: cause.into(),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Scaffold(e) => write!(f, "failed to fetch scaffold files: {:#}", e),
            ExportError::Entity { kind, title, cause } => {
                write!(f, "{} '{}': {}", kind, title, cause)
            }
            ExportError::TestFile(cause) => write!(f, "{}: {}", TEST_FILE_PATH, cause),
            ExportError::Package(e) => write!(f, "failed to write package: {:#}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Scaffold(e) | ExportError::Package(e) => Some(&**e),
            ExportError::Entity { cause, .. } | ExportError::TestFile(cause) => Some(cause),
        }
    }
}

/// Per-export behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub collision_policy: CollisionPolicy,
    pub missing_prepare: MissingPreparePolicy,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            collision_policy: config.collision_policy,
            missing_prepare: config.missing_prepare,
        }
    }
}

/// Rendered test cases in combined-file order.
#[derive(Debug, Default)]
struct GeneratedCases {
    deployments: Vec<String>,
    transactions: Vec<String>,
    scripts: Vec<String>,
}

impl GeneratedCases {
    fn into_ordered(self) -> Vec<String> {
        let mut cases = self.deployments;
        cases.extend(self.transactions);
        cases.extend(self.scripts);
        cases
    }
}

pub struct ProjectExporter {
    scaffold: Arc<dyn ScaffoldSource>,
    formatter: Arc<dyn CodeFormatter>,
    options: ExportOptions,
}

impl ProjectExporter {
    pub fn new(scaffold: Arc<dyn ScaffoldSource>, formatter: Arc<dyn CodeFormatter>) -> Self {
        Self {
            scaffold,
            formatter,
            options: ExportOptions::default(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.scaffold_source(), config.code_formatter()).with_options(config.into())
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate the complete file set of an export without writing it.
    pub async fn build_bundle(&self, project: &Project) -> Result<ExportBundle, ExportError> {
        let scaffold = fetch_scaffold(self.scaffold.as_ref())
            .await
            .map_err(ExportError::Scaffold)?;

        let mut bundle = ExportBundle::new(self.options.collision_policy);
        for (path, contents) in scaffold.entries() {
            bundle.insert(format!("{}/{}", TEST_DIR, path), contents);
        }

        let cases = self.generate(project, &mut bundle).await?;
        let test_file = self.combine(project, &cases).await?;
        bundle.insert(TEST_FILE_PATH, test_file);

        info!(
            project = %project.id,
            files = bundle.len(),
            bytes = bundle.total_bytes(),
            "export bundle assembled"
        );
        Ok(bundle)
    }

    /// Only the combined test file; no scaffold files are fetched.
    pub async fn render_test_file(&self, project: &Project) -> Result<String, ExportError> {
        let mut scratch = ExportBundle::new(self.options.collision_policy);
        let cases = self.generate(project, &mut scratch).await?;
        self.combine(project, &cases).await
    }

    /// Build the bundle and hand every file to `writer`.
    ///
    /// Nothing is written unless the whole bundle was generated.
    pub async fn export(
        &self,
        project: &Project,
        writer: &mut dyn PackageWriter,
    ) -> Result<PackageArtifact, ExportError> {
        let bundle = self.build_bundle(project).await?;
        for (path, contents) in bundle.iter() {
            writer
                .write(path, contents)
                .await
                .map_err(ExportError::Package)?;
        }
        writer.finalize().await.map_err(ExportError::Package)
    }

    async fn combine(&self, project: &Project, cases: &[String]) -> Result<String, ExportError> {
        let suite = suite_name(project);
        let raw = assemble::render_test_file(&suite, cases)
            .map_err(|e| ExportError::TestFile(e.into()))?;
        self.formatter
            .format(&raw)
            .await
            .map_err(|e| ExportError::TestFile(e.into()))
    }

    async fn format_case(&self, case: &TestCase<'_>) -> Result<String, EntityFailure> {
        let raw = case.render()?;
        Ok(self.formatter.format(&raw).await?)
    }

    /// Render every entity's test case and add its source file to `bundle`.
    async fn generate(
        &self,
        project: &Project,
        bundle: &mut ExportBundle,
    ) -> Result<Vec<String>, ExportError> {
        let mut cases = GeneratedCases::default();

        for account in &project.accounts {
            let facts = SourceFacts::scan(&account.draft_code);
            let Some(contract_name) = facts.contract_name.as_deref() else {
                debug!(address = %account.address, "account has no contract declaration, skipped");
                continue;
            };
            let kind = EntityKind::Contract;
            let path = bundle
                .claim_path(&source_path(kind, contract_name))
                .map_err(|e| ExportError::entity(kind, contract_name, e))?;
            let test_name = format!("Deploy {}", contract_name);
            let case = TestCase {
                kind: CaseKind::Deployment {
                    contract_name,
                    deployer: &account.address,
                },
                test_name: &test_name,
                entity_name: file_stem(&path),
                facts: &facts,
            };
            let rendered = self
                .format_case(&case)
                .await
                .map_err(|e| ExportError::entity(kind, contract_name, e))?;
            info!(contract = contract_name, path = %path, "deployment test rendered");
            cases.deployments.push(rendered);
            bundle.insert(path, account.draft_code.as_str());
        }

        for (index, template) in project.transaction_templates.iter().enumerate() {
            let kind = EntityKind::Transaction;
            let slug = slugify(&template.title, kind, index);
            let title = display_title(&template.title, &slug);
            let path = bundle
                .claim_path(&source_path(kind, &slug))
                .map_err(|e| ExportError::entity(kind, title, e))?;

            let facts = SourceFacts::scan(&template.script);
            let signer_count = match extract_signer_count(&template.script) {
                Ok(count) => count,
                Err(e) => match self.options.missing_prepare {
                    MissingPreparePolicy::ZeroSigners => {
                        warn!(transaction = title, "no prepare clause, assuming zero signers");
                        0
                    }
                    MissingPreparePolicy::Fail => return Err(ExportError::entity(kind, title, e)),
                },
            };
            let signers = select_signers(&template.signers, signer_count, title);

            let case = TestCase {
                kind: CaseKind::Transaction { signers: &signers },
                test_name: title,
                entity_name: file_stem(&path),
                facts: &facts,
            };
            let rendered = self
                .format_case(&case)
                .await
                .map_err(|e| ExportError::entity(kind, title, e))?;
            info!(transaction = title, path = %path, signers = signers.len(), "transaction test rendered");
            cases.transactions.push(rendered);
            bundle.insert(path, template.script.as_str());
        }

        for (index, template) in project.script_templates.iter().enumerate() {
            let kind = EntityKind::Script;
            let slug = slugify(&template.title, kind, index);
            let title = display_title(&template.title, &slug);
            let path = bundle
                .claim_path(&source_path(kind, &slug))
                .map_err(|e| ExportError::entity(kind, title, e))?;

            let facts = SourceFacts::scan(&template.script);
            let case = TestCase {
                kind: CaseKind::Script,
                test_name: title,
                entity_name: file_stem(&path),
                facts: &facts,
            };
            let rendered = self
                .format_case(&case)
                .await
                .map_err(|e| ExportError::entity(kind, title, e))?;
            info!(script = title, path = %path, "script test rendered");
            cases.scripts.push(rendered);
            bundle.insert(path, template.script.as_str());
        }

        Ok(cases.into_ordered())
    }
}

impl Default for ProjectExporter {
    /// Builtin formatter over an empty in-memory scaffold.
    fn default() -> Self {
        Self::new(
            Arc::new(StaticScaffoldSource::empty()),
            Arc::new(crate::formatter::BuiltinFormatter),
        )
    }
}

fn suite_name(project: &Project) -> String {
    let id = project.id.trim();
    if id.is_empty() {
        "Playground project".to_string()
    } else {
        format!("Playground project {}", id)
    }
}

fn display_title<'a>(title: &'a str, slug: &'a str) -> &'a str {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        slug
    } else {
        trimmed
    }
}

/// Signers for a transaction requiring `required` of them: the editor's
/// selection cut down to `required`, then padded with default accounts.
fn select_signers(selected: &[String], required: usize, title: &str) -> Vec<String> {
    let mut signers = selected.to_vec();
    if signers.len() > required {
        warn!(
            transaction = title,
            selected = signers.len(),
            required,
            "more signers selected than prepare() accepts, truncating"
        );
        signers.truncate(required);
    }
    pad_to_signer_count(&signers, required)
}
