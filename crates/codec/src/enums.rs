//! Enumerations with declared names and ordinals.

/// An enum whose variants have fixed symbolic names and integer positions.
///
/// `VARIANTS` lists the declared `(name, ordinal)` pairs. A value may carry an
/// ordinal outside that list (for example one read from an older producer);
/// such a value can be written as an ordinal but has no symbolic form.
pub trait EnumRepr: Sized {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;
    const VARIANTS: &'static [(&'static str, i64)];

    fn ordinal(&self) -> i64;

    /// Value for a declared ordinal.
    fn from_ordinal(ordinal: i64) -> Option<Self>;

    fn name(&self) -> Option<&'static str> {
        let ordinal = self.ordinal();
        Self::VARIANTS
            .iter()
            .find(|(_, o)| *o == ordinal)
            .map(|(name, _)| *name)
    }
}

/// Declared ordinal for `name`.
pub(crate) fn ordinal_of<E: EnumRepr>(name: &str, ignore_case: bool) -> Option<i64> {
    E::VARIANTS
        .iter()
        .find(|(declared, _)| {
            if ignore_case {
                crate::naming::keys_match_ignore_case(declared, name)
            } else {
                *declared == name
            }
        })
        .map(|(_, ordinal)| *ordinal)
}

pub(crate) fn is_declared<E: EnumRepr>(ordinal: i64) -> bool {
    E::VARIANTS.iter().any(|(_, o)| *o == ordinal)
}
