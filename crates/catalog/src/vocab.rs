//! Closed vocabularies shared across the catalog.
//!
//! Every enum here has a fixed lowercase, hyphenated wire form (for example `in-stock`). The
//! `closed_vocabulary!` macro generates the serde mapping together with `ALL`, `as_str`, `parse`,
//! `Display` and `FromStr`, so that the entity modules only list their variants.

/// Declares a closed vocabulary enum with its wire spellings.
///
/// `parse` is case-insensitive and accepts `_` in place of `-`.
macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            /// Returns the wire spelling of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parses a value from its wire spelling.
            ///
            /// # Errors
            ///
            /// Returns [`crate::CatalogError::InvalidInput`] if the string does not name a value.
            pub fn parse(s: &str) -> Result<Self, crate::CatalogError> {
                let wanted = s.trim().to_lowercase().replace('_', "-");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str() == wanted)
                    .ok_or_else(|| {
                        crate::CatalogError::InvalidInput(format!("Invalid {}: {}", $label, s))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

closed_vocabulary! {
    /// Staff role selecting a dashboard tab set.
    Role("role") {
        Nurse => "nurse",
        Doctor => "doctor",
        WardIncharge => "ward-incharge",
        LabTechnician => "lab-technician",
        Pharmacist => "pharmacist",
        Radiologist => "radiologist",
        Nutritionist => "nutritionist",
        PhysicalTherapist => "physical-therapist",
    }
}

closed_vocabulary! {
    /// Clinical urgency of an order, prescription, refill or referral.
    Urgency("urgency") {
        /// Immediate.
        Stat => "stat",
        Urgent => "urgent",
        Routine => "routine",
    }
}

closed_vocabulary! {
    /// Severity of an alert or incident.
    Severity("severity") {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

closed_vocabulary! {
    /// Priority of a request awaiting a doctor.
    Priority("priority") {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_and_accepts_underscores() {
        assert_eq!(Role::parse("Ward_InCharge").unwrap(), Role::WardIncharge);
        assert_eq!(Urgency::parse(" STAT ").unwrap(), Urgency::Stat);
        assert_eq!("lab-technician".parse::<Role>().unwrap(), Role::LabTechnician);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let err = Severity::parse("catastrophic").unwrap_err();
        assert!(err.to_string().contains("severity"));
    }

    #[test]
    fn test_wire_spelling_matches_display() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(Role::parse(role.as_str()).unwrap(), *role);
        }
        assert_eq!(Role::ALL.len(), 8);
    }
}
