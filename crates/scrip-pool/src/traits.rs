use scrip_types::{Output, UtxoId};

/// Read access to a set of unspent outputs.
///
/// The validation engine only ever reads through this trait, so anything
/// that can answer these two questions can be validated against.
pub trait UtxoView {
    /// Whether `id` names an unspent output.
    fn contains(&self, id: &UtxoId) -> bool;

    /// The output named by `id`, or `None` if it is not unspent.
    fn get(&self, id: &UtxoId) -> Option<&Output>;
}
