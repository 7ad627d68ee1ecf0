//! Opaque identifier for masked fields.

/// Key of a field within a [`MaskedInputStore`](crate::MaskedInputStore).
///
/// The value carries no meaning inside this crate. Integration layers map
/// their own element ids onto it with `From`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<u32> for FieldId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw as u64)
    }
}

impl From<FieldId> for u64 {
    #[inline]
    fn from(id: FieldId) -> Self {
        id.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_round_trip() {
        let id = FieldId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(u64::from(id), 42);
        assert_eq!(FieldId::from(7u32), FieldId::from_raw(7));
    }

    #[test]
    fn field_ids_key_a_set() {
        use std::collections::HashSet;

        let set: HashSet<FieldId> = [1u64, 2, 1].into_iter().map(FieldId::from).collect();
        assert_eq!(set.len(), 2);
    }
}
