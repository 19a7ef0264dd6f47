//! JavaScript skeletons for the generated `flow-js-testing` suite.
//!
//! Block markers stand alone on their line; conditionals sit inside call
//! argument lists and may leave empty `, ,` entries behind, which the code
//! formatter removes.

/// Marker names shared by the skeletons and the fragment builders.
pub mod markers {
    pub const ACCOUNTS: &str = "ACCOUNTS";
    pub const ADDRESS_MAP: &str = "ADDRESS-MAP";
    pub const ACCOUNT_SHIM: &str = "ACCOUNT-SHIM";
    pub const SIGNERS: &str = "SIGNERS";
    pub const ARGUMENTS: &str = "ARGUMENTS";
    pub const TEST_CASES: &str = "TEST-CASES";

    pub const TEST_NAME: &str = "TEST-NAME";
    pub const ENTITY_NAME: &str = "ENTITY-NAME";
    pub const CONTRACT_NAME: &str = "CONTRACT-NAME";
    pub const DEPLOYER: &str = "DEPLOYER";
    pub const PROJECT_NAME: &str = "PROJECT-NAME";

    /// Variables declared by gated blocks.
    pub const ADDRESS_MAP_VAR: &str = "addressMap";
    pub const ARGUMENTS_VAR: &str = "args";
    pub const SIGNERS_VAR: &str = "signers";
}

pub const TEST_FILE: &str = r#"import path from "path";
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

describe(##PROJECT-NAME##, () => {
  beforeEach(async () => {
    const basePath = path.resolve(__dirname, "../cadence");
    const port = 8080;
    await init(basePath, { port });
    return emulator.start(port, false);
  });

  afterEach(async () => {
    return emulator.stop();
  });

  // ##TEST-CASES##
});
"#;

pub const DEPLOYMENT_TEST: &str = r#"test(##TEST-NAME##, async () => {
  // ##ACCOUNTS##
  // ##ADDRESS-MAP##
  const to = ##DEPLOYER##;
  let code = await getContractCode({ name: ##ENTITY-NAME##, ##ADDRESS-MAP-CONDITIONAL## });
  // ##ACCOUNT-SHIM##
  // ##ARGUMENTS##
  const deployed = await deployContract({ to, name: ##CONTRACT-NAME##, code, ##ARGUMENTS-CONDITIONAL## });
  expect(deployed).toBeDefined();
});
"#;

pub const TRANSACTION_TEST: &str = r#"test(##TEST-NAME##, async () => {
  // ##ACCOUNTS##
  // ##ADDRESS-MAP##
  let code = await getTransactionCode({ name: ##ENTITY-NAME##, ##ADDRESS-MAP-CONDITIONAL## });
  // ##ACCOUNT-SHIM##
  // ##SIGNERS##
  // ##ARGUMENTS##
  const txResult = await sendTransaction({ code, ##SIGNERS-CONDITIONAL##, ##ARGUMENTS-CONDITIONAL## });
  expect(txResult).toBeDefined();
});
"#;

pub const SCRIPT_TEST: &str = r#"test(##TEST-NAME##, async () => {
  // ##ACCOUNTS##
  // ##ADDRESS-MAP##
  let code = await getScriptCode({ name: ##ENTITY-NAME##, ##ADDRESS-MAP-CONDITIONAL## });
  // ##ACCOUNT-SHIM##
  // ##ARGUMENTS##
  const result = await executeScript({ code, ##ARGUMENTS-CONDITIONAL## });
  expect(result).toBeDefined();
});
"#;
