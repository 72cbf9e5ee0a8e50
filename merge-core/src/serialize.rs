use crate::error::BitResult;
use std::io::{prelude::*, BufReader};

pub trait Serialize {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()>;
}

/// object-safe by construction: every `deserialize` takes `&mut impl BufRead`
/// rather than `Self: Sized` methods on the trait itself, so `Deserialize`
/// can still be named as a bound without infecting callers with `Sized`.
pub trait Deserialize {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self>
    where
        Self: Sized;

    fn deserialize_unbuffered(reader: impl Read) -> BitResult<Self>
    where
        Self: Sized,
    {
        Self::deserialize(&mut BufReader::new(reader))
    }

    fn deserialize_from_slice(slice: &[u8]) -> BitResult<Self>
    where
        Self: Sized,
    {
        Self::deserialize(&mut BufReader::new(slice))
    }
}
