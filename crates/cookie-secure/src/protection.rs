//! Translation from the public [`ProtectionLevel`] to the service's [`MachineKeyProtection`].

use common::ProtectionLevel;

use crate::machine_key::MachineKeyProtection;

/// Map a public protection level onto the keyed-cryptography vocabulary.
///
/// `Encryption` and `Validation` map to themselves. Every other level falls
/// back to [`MachineKeyProtection::All`], including `None`: callers that want
/// plain text must short-circuit before reaching the service.
pub fn map(level: ProtectionLevel) -> MachineKeyProtection {
    match level {
        ProtectionLevel::Encryption => MachineKeyProtection::Encryption,
        ProtectionLevel::Validation => MachineKeyProtection::Validation,
        ProtectionLevel::All | ProtectionLevel::None => MachineKeyProtection::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_levels_map_directly() {
        assert_eq!(map(ProtectionLevel::Encryption), MachineKeyProtection::Encryption);
        assert_eq!(map(ProtectionLevel::Validation), MachineKeyProtection::Validation);
    }

    #[test]
    fn remaining_levels_fall_back_to_all() {
        assert_eq!(map(ProtectionLevel::All), MachineKeyProtection::All);
        assert_eq!(map(ProtectionLevel::None), MachineKeyProtection::All);
    }
}
