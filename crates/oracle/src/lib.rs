/*!
This crate defines the stock membership oracles for gram-synth.

The core crate treats the oracle as a black box; anything implementing
[`Oracle`] can guide synthesis, including a plain closure. This crate
supplies the implementations the CLI exposes: an XML well-formedness oracle,
an anchored regular-expression oracle, and an external-command oracle.

All of them uphold the oracle contract: internal failures are translated to
`false`, never surfaced.
*/

mod command;
mod text;
mod xml;

pub use command::CommandOracle;
pub use text::{RegexOracle, RegexOracleError};
pub use xml::XmlOracle;

pub use gram_synth_core::Oracle;
