//! Test-case assembly: facts in, substituted skeleton out.

use playground_extractor::SourceFacts;

use crate::fragments::{
    account_bindings, account_ref, account_shim, address_map, arguments, js_string, signers,
};
use crate::skeletons::{self, markers};
use crate::template::{render, Fragments, TemplateError};

/// The entity-specific half of a test case.
#[derive(Debug, Clone, Copy)]
pub enum CaseKind<'a> {
    Deployment {
        contract_name: &'a str,
        deployer: &'a str,
    },
    Transaction {
        signers: &'a [String],
    },
    Script,
}

/// One test case to render.
#[derive(Debug, Clone, Copy)]
pub struct TestCase<'a> {
    pub kind: CaseKind<'a>,
    pub test_name: &'a str,
    /// Name the generated test loads the Cadence source by.
    pub entity_name: &'a str,
    pub facts: &'a SourceFacts,
}

impl<'a> TestCase<'a> {
    fn skeleton(&self) -> &'static str {
        match self.kind {
            CaseKind::Deployment { .. } => skeletons::DEPLOYMENT_TEST,
            CaseKind::Transaction { .. } => skeletons::TRANSACTION_TEST,
            CaseKind::Script => skeletons::SCRIPT_TEST,
        }
    }

    /// Every address the case needs a named account for.
    fn referenced_accounts(&self) -> Vec<&'a str> {
        let facts = self.facts;
        let mut addresses: Vec<&str> = facts
            .imports
            .iter()
            .map(|import| import.address.as_str())
            .chain(facts.account_calls.iter().map(String::as_str))
            .collect();
        match self.kind {
            CaseKind::Deployment { deployer, .. } => addresses.push(deployer),
            CaseKind::Transaction { signers } => {
                addresses.extend(signers.iter().map(String::as_str))
            }
            CaseKind::Script => {}
        }
        addresses
    }

    pub fn fragments(&self) -> Fragments {
        let facts = self.facts;
        let mut fragments = Fragments::new()
            .inline(markers::TEST_NAME, js_string(self.test_name))
            .inline(markers::ENTITY_NAME, js_string(self.entity_name))
            .block(markers::ACCOUNTS, account_bindings(self.referenced_accounts()))
            .gated_block(
                markers::ADDRESS_MAP,
                markers::ADDRESS_MAP_VAR,
                address_map(&facts.imports),
            )
            .block(markers::ACCOUNT_SHIM, account_shim(&facts.account_calls))
            .gated_block(
                markers::ARGUMENTS,
                markers::ARGUMENTS_VAR,
                arguments(&facts.argument_groups),
            );

        match self.kind {
            CaseKind::Deployment {
                contract_name,
                deployer,
            } => {
                fragments = fragments
                    .inline(markers::CONTRACT_NAME, js_string(contract_name))
                    .inline(markers::DEPLOYER, account_ref(deployer));
            }
            CaseKind::Transaction { signers: selected } => {
                fragments =
                    fragments.gated_block(markers::SIGNERS, markers::SIGNERS_VAR, signers(selected));
            }
            CaseKind::Script => {}
        }
        fragments
    }

    /// Substituted, unformatted test block.
    pub fn render(&self) -> Result<String, TemplateError> {
        render(self.skeleton(), &self.fragments())
    }
}

/// The combined test file around already-rendered cases.
pub fn render_test_file(project_name: &str, cases: &[String]) -> Result<String, TemplateError> {
    let fragments = Fragments::new()
        .inline(markers::PROJECT_NAME, js_string(project_name))
        .block(markers::TEST_CASES, cases.join("\n"));
    render(skeletons::TEST_FILE, &fragments)
}
