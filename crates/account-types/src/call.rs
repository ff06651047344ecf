//! Call types and `__execute__` calldata compilation.

use crate::hash::selector_from_name;
use starknet_types_core::felt::Felt;

/// A single contract call inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
	/// Address of the contract being called.
	pub contract_address: Felt,
	/// Selector of the entry point being invoked.
	pub selector: Felt,
	/// Raw calldata passed to the entry point.
	pub calldata: Vec<Felt>,
}

impl Call {
	/// Creates a call from an entry-point name.
	pub fn new(contract_address: Felt, entry_point: &str, calldata: Vec<Felt>) -> Self {
		Self {
			contract_address,
			selector: selector_from_name(entry_point),
			calldata,
		}
	}
}

/// Compiles the account's `__execute__` calldata for a batch of calls.
///
/// Layout: `[n_calls, (to, selector, calldata_len, calldata...)*n_calls]`.
pub fn compile_execute_calldata(calls: &[Call]) -> Vec<Felt> {
	let mut out = vec![Felt::from(calls.len() as u64)];
	for call in calls {
		out.push(call.contract_address);
		out.push(call.selector);
		out.push(Felt::from(call.calldata.len() as u64));
		out.extend_from_slice(&call.calldata);
	}
	out
}
