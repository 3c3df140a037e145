//! Enum pusher
//!
//! Enumerated host values cross the boundary as their canonical name, a
//! plain runtime string. A type opts in by implementing [`ScriptEnum`],
//! usually through [`script_enum!`](crate::script_enum), which also
//! implements [`Push`](crate::Push) for it. Nothing reaches this path by
//! accident: there is no blanket impl over arbitrary enums.

use scriptpush_core::ScriptRuntime;

/// Name registry for an enumerated type
pub trait ScriptEnum: Sized + Copy + 'static {
    /// Name scripts use for this value
    fn canonical_name(&self) -> &'static str;

    /// Every value, in declaration order
    fn variants() -> &'static [Self];

    /// Reverse lookup of `canonical_name`
    fn from_canonical_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.canonical_name() == name)
    }
}

/// Push an enumerated value as its canonical name
pub fn push_enum<E, R>(rt: &mut R, value: &E)
where
    E: ScriptEnum,
    R: ScriptRuntime + ?Sized,
{
    rt.push_string(value.canonical_name());
}

/// Declare a fieldless enum whose values push as their canonical names
///
/// ```
/// scriptpush::script_enum! {
///     /// Weapon slot
///     pub enum Slot {
///         Primary => "primary",
///         Melee => "melee",
///     }
/// }
///
/// use scriptpush::ScriptEnum;
/// assert_eq!(Slot::Melee.canonical_name(), "melee");
/// assert_eq!(Slot::from_canonical_name("primary"), Some(Slot::Primary));
/// assert_eq!(Slot::Primary.to_string(), "primary");
/// ```
#[macro_export]
macro_rules! script_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::ScriptEnum for $name {
            fn canonical_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            fn variants() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }
        }

        impl $crate::Push for $name {
            fn push<R: $crate::ScriptRuntime + ?Sized>(&self, rt: &mut R) {
                $crate::push_enum(rt, self)
            }
        }

        impl $crate::PushKey for $name {}

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::ScriptEnum::canonical_name(self))
            }
        }
    };
}
