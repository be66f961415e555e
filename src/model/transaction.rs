use serde::Deserialize;
use serde::Serialize;

/// Transaction as served by an Esplora instance (`GET /tx/{txid}`).
/// Only the fields the address discovery reads are modelled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EsploraTransaction {
  #[serde(default)]
  pub txid: Option<String>,
  pub vin:  Vec<EsploraInput>,
  pub vout: Vec<EsploraOutput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EsploraInput {
  // Absent on coinbase inputs
  #[serde(default)]
  pub prevout:     Option<EsploraOutput>,
  #[serde(default)]
  pub is_coinbase: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EsploraOutput {
  // Absent on non-standard scripts (OP_RETURN, bare multisig, ...)
  #[serde(default)]
  pub scriptpubkey_address: Option<String>,
  #[serde(default)]
  pub scriptpubkey_type:    Option<String>,
  #[serde(default)]
  pub value:                Option<u64>,
}

impl EsploraTransaction {
  /// Source addresses of the spent outputs followed by destination addresses.
  pub fn addresses(&self) -> impl Iterator<Item = &str> {
    let inputs = self
      .vin
      .iter()
      .filter_map(|input| input.prevout.as_ref())
      .filter_map(|prevout| prevout.scriptpubkey_address.as_deref());
    let outputs = self.vout.iter().filter_map(|output| output.scriptpubkey_address.as_deref());
    inputs.chain(outputs)
  }
}
