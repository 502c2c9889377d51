use core::fmt::Debug;
use core::mem::size_of;

/// Big endian on-disk field
#[derive(Copy, Clone, Default, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Big<T: Copy + Clone + Default + Debug + PartialEq + PartialOrd + Sized>(T);

macro_rules! define {
    ($type:ty) => {
        impl Big<$type> {
            pub fn to_ne(self) -> $type {
                <$type>::from_be(self.0)
            }

            /// None if bytes shorter than the field
            pub fn from_slice(bytes: &[u8]) -> Option<Self> {
                let array = bytes.get(..size_of::<$type>())?.try_into().ok()?;
                Some(Self(<$type>::from_ne_bytes(array)))
            }
        }

        impl From<Big<$type>> for $type {
            #[inline]
            fn from(big: Big<$type>) -> $type {
                <$type>::from_be(big.0)
            }
        }

        impl From<$type> for Big<$type> {
            #[inline]
            fn from(t: $type) -> Self {
                Self(<$type>::to_be(t))
            }
        }
    };
}

define!(u16);
define!(u32);
