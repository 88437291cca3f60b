//! Discretization algorithm selectors.
//!
//! Each selector maps to the integer code the engine reads from its
//! `algo.*` keys. Codes are stable; code 0 is the default for every
//! selector.

use std::fmt;

use picdeck_core::ValidationError;

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            $( $(#[$vmeta])* $variant = $code ),+
        }

        impl $name {
            /// Every variant in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Integer code written to the deck.
            pub fn code(self) -> u8 {
                self as u8
            }

            /// Look up a variant by its integer code.
            pub fn from_code(code: i64) -> Result<Self, ValidationError> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| i64::from(v.code()) == code)
                    .ok_or_else(|| ValidationError::UnknownOption {
                        kind: $kind,
                        value: code.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

coded_enum! {
    /// Current deposition scheme.
    CurrentDeposition, "current deposition algorithm" {
        /// Charge-conserving Esirkepov scheme.
        Esirkepov = 0,
        /// Esirkepov without the vectorized inner loop.
        EsirkepovNonOptimized = 1,
        /// Direct deposition, vectorized.
        DirectVectorized = 2,
        /// Direct deposition.
        Direct = 3,
    }
}

coded_enum! {
    /// Charge deposition scheme.
    ChargeDeposition, "charge deposition algorithm" {
        /// Vectorized deposition.
        Vectorized = 0,
        /// Scalar deposition.
        Standard = 1,
    }
}

coded_enum! {
    /// Field gathering scheme.
    FieldGathering, "field gathering algorithm" {
        /// Vectorized gather.
        Vectorized = 0,
        /// Scalar gather.
        Standard = 1,
    }
}

coded_enum! {
    /// Particle pusher.
    ParticlePusher, "particle pusher" {
        /// Boris pusher.
        Boris = 0,
        /// Vay pusher.
        Vay = 1,
    }
}

/// The four algorithm selectors carried by a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Algorithms {
    /// Current deposition. Default: Esirkepov.
    pub current_deposition: CurrentDeposition,
    /// Charge deposition. Default: vectorized.
    pub charge_deposition: ChargeDeposition,
    /// Field gathering. Default: vectorized.
    pub field_gathering: FieldGathering,
    /// Particle pusher. Default: Boris.
    pub particle_pusher: ParticlePusher,
}

impl Algorithms {
    /// Build from the four integer codes, in deck order.
    pub fn from_codes(
        current_deposition: i64,
        charge_deposition: i64,
        field_gathering: i64,
        particle_pusher: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            current_deposition: CurrentDeposition::from_code(current_deposition)?,
            charge_deposition: ChargeDeposition::from_code(charge_deposition)?,
            field_gathering: FieldGathering::from_code(field_gathering)?,
            particle_pusher: ParticlePusher::from_code(particle_pusher)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_code_zero() {
        let a = Algorithms::default();
        assert_eq!(a.current_deposition.code(), 0);
        assert_eq!(a.charge_deposition.code(), 0);
        assert_eq!(a.field_gathering.code(), 0);
        assert_eq!(a.particle_pusher.code(), 0);
    }

    #[test]
    fn codes_round_trip() {
        for v in CurrentDeposition::ALL {
            assert_eq!(CurrentDeposition::from_code(i64::from(v.code())), Ok(*v));
        }
        assert_eq!(CurrentDeposition::Direct.code(), 3);
        assert_eq!(ParticlePusher::from_code(1), Ok(ParticlePusher::Vay));
    }

    #[test]
    fn unknown_code_rejected() {
        assert_eq!(
            FieldGathering::from_code(2),
            Err(ValidationError::UnknownOption {
                kind: "field gathering algorithm",
                value: "2".to_string(),
            })
        );
        assert!(CurrentDeposition::from_code(-1).is_err());
        assert!(Algorithms::from_codes(0, 0, 0, 7).is_err());
    }

    #[test]
    fn from_codes_in_deck_order() {
        let a = Algorithms::from_codes(3, 1, 0, 1).unwrap();
        assert_eq!(a.current_deposition, CurrentDeposition::Direct);
        assert_eq!(a.charge_deposition, ChargeDeposition::Standard);
        assert_eq!(a.field_gathering, FieldGathering::Vectorized);
        assert_eq!(a.particle_pusher, ParticlePusher::Vay);
    }
}
