macro_rules! impl_buf {
    ($name:ident, $len:expr) => {
        #[derive(
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::borsh::BorshSerialize,
            ::borsh::BorshDeserialize,
        )]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length of the buffer in bytes.
            pub const LEN: usize = $len;

            pub const fn new(data: [u8; $len]) -> Self {
                Self(data)
            }

            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            pub fn as_slice(&self) -> &[u8] {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn into_inner(self) -> [u8; $len] {
                self.0
            }

            /// Copies from a slice, failing on a length mismatch.
            pub fn try_from_slice(data: &[u8]) -> Option<Self> {
                let arr: [u8; $len] = data.try_into().ok()?;
                Some(Self(arr))
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl ::std::convert::From<[u8; $len]> for $name {
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl ::std::convert::From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl ::std::convert::AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&::hex::encode(self.0))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&::hex::encode(self.0))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&::hex::encode(self.0))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = <::std::string::String as ::serde::Deserialize>::deserialize(d)?;
                let raw = ::hex::decode(&s).map_err(::serde::de::Error::custom)?;
                Self::try_from_slice(&raw).ok_or_else(|| {
                    ::serde::de::Error::custom(format!(
                        "expected {} hex bytes, got {}",
                        $len,
                        raw.len()
                    ))
                })
            }
        }
    };
}
