use crate::error::BitResult;
use crate::oid::Oid;
use crate::serialize::{Deserialize, Serialize};
use std::io::prelude::*;

/// A commit, reduced to the two things the merge core ever asks of one: its
/// tree and its parents. Author/committer/message/signature are read past
/// (kept as an opaque trailer) so a round-tripped commit is still
/// byte-identical, but nothing in this crate inspects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree: Oid,
    pub parents: Vec<Oid>,
    trailer: Vec<u8>,
}

impl Commit {
    pub fn new(tree: Oid, parents: Vec<Oid>) -> Self {
        Self { tree, parents, trailer: vec![] }
    }
}

impl Serialize for Commit {
    fn serialize(&self, writer: &mut dyn Write) -> BitResult<()> {
        writeln!(writer, "tree {}", self.tree)?;
        for parent in &self.parents {
            writeln!(writer, "parent {}", parent)?;
        }
        writer.write_all(&self.trailer)?;
        Ok(())
    }
}

impl Deserialize for Commit {
    fn deserialize(reader: &mut impl BufRead) -> BitResult<Self> {
        let mut tree = None;
        let mut parents = vec![];
        let mut trailer = vec![];
        loop {
            let mut line = vec![];
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                break;
            }
            let text = std::str::from_utf8(&line)?.trim_end_matches('\n');
            if let Some(rest) = text.strip_prefix("tree ") {
                tree = Some(rest.parse()?);
            } else if let Some(rest) = text.strip_prefix("parent ") {
                parents.push(rest.parse()?);
            } else {
                trailer.extend_from_slice(&line);
                trailer.extend_from_slice(&reader.read_to_vec_remaining()?);
                break;
            }
        }
        Ok(Self {
            tree: tree.ok_or_else(|| anyhow!("commit object missing `tree` header"))?,
            parents,
            trailer,
        })
    }
}

trait ReadToVecRemaining: BufRead {
    fn read_to_vec_remaining(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = vec![];
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl<R: BufRead + ?Sized> ReadToVecRemaining for R {
}
