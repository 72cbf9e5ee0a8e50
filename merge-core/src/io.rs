//! Small binary I/O helpers shared by the on-disk formats in [`crate::odb`]
//! and [`crate::index`]. Trimmed down to the handful of fixed-width reads
//! those formats actually need — no packfile varint/delta/offset encodings.

use crate::error::BitResult;
use crate::oid::Oid;
use crate::serialize::Deserialize;
use std::io::{self, prelude::*, BufReader};

// all big-endian, matching git's on-disk index and tree formats
pub(crate) trait ReadExt: Read {
    #[inline]
    fn read_u8(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_u16(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    #[inline]
    fn read_u32(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    #[inline]
    fn read_u64(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    #[inline]
    fn read_oid(&mut self) -> io::Result<Oid> {
        let mut buf = [0u8; 20];
        self.read_exact(&mut buf)?;
        Ok(Oid::new(buf))
    }

    #[inline]
    fn read_to_vec(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = vec![];
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read + ?Sized> ReadExt for R {
}

impl Deserialize for u8 {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        Ok(reader.read_u8()?)
    }
}

impl Deserialize for u32 {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        Ok(reader.read_u32()?)
    }
}

impl Deserialize for u64 {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        Ok(reader.read_u64()?)
    }
}

impl Deserialize for Oid {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        Ok(reader.read_oid()?)
    }
}

impl Deserialize for Vec<u8> {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        Ok(reader.read_to_vec()?)
    }
}

impl crate::serialize::Serialize for Vec<u8> {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()> {
        Ok(writer.write_all(self)?)
    }
}

pub(crate) trait BufReadExtSized: BufRead + Sized {
    fn read_vec<T: Deserialize>(&mut self, n: usize) -> BitResult<Vec<T>> {
        let mut vec = Vec::with_capacity(n);
        for _ in 0..n {
            vec.push(T::deserialize(&mut *self)?);
        }
        Ok(vec)
    }
}

impl<R: BufRead> BufReadExtSized for R {
}

pub(crate) fn buffered(reader: impl Read) -> BufReader<impl Read> {
    BufReader::new(reader)
}
