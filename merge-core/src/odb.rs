//! The object database. Network transport, packfiles and delta compression
//! are an external collaborator the merge core never touches directly — this
//! is just enough of a loose object store (git's `.git/objects/xx/yyyy...`
//! layout) to read and write blobs, trees and commits by [`Oid`].

use crate::error::{BitError, BitResult};
use crate::lockfile::{Lockfile, LockfileFlags};
use crate::obj::{Blob, Commit, Obj, ObjType, Tree};
use crate::oid::Oid;
use crate::serialize::{Deserialize, Serialize};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{prelude::*, BufReader};
use std::path::PathBuf;

pub trait Odb {
    fn read(&self, oid: Oid) -> BitResult<Obj>;
    fn write(&self, obj: &Obj) -> BitResult<Oid>;
    fn exists(&self, oid: Oid) -> BitResult<bool>;

    fn read_blob(&self, oid: Oid) -> BitResult<Blob> {
        match self.read(oid)? {
            Obj::Blob(blob) => Ok(blob),
            obj => bail!("expected blob at `{}`, found {}", oid, obj.obj_type()),
        }
    }

    fn read_tree(&self, oid: Oid) -> BitResult<Tree> {
        if oid == Oid::EMPTY_TREE {
            return Ok(Tree::default());
        }
        match self.read(oid)? {
            Obj::Tree(tree) => Ok(tree),
            obj => bail!("expected tree at `{}`, found {}", oid, obj.obj_type()),
        }
    }

    fn read_commit(&self, oid: Oid) -> BitResult<Commit> {
        match self.read(oid)? {
            Obj::Commit(commit) => Ok(commit),
            obj => bail!("expected commit at `{}`, found {}", oid, obj.obj_type()),
        }
    }

    fn write_blob(&self, blob: Blob) -> BitResult<Oid> {
        self.write(&Obj::Blob(blob))
    }

    fn write_tree(&self, tree: Tree) -> BitResult<Oid> {
        if tree.is_empty() {
            return Ok(Oid::EMPTY_TREE);
        }
        self.write(&Obj::Tree(tree))
    }
}

/// the loose-object backend: each object lives at
/// `<objects_dir>/<first two hex digits of oid>/<remaining 38>`, zlib
/// compressed, prefixed with a `"{type} {len}\0"` header.
pub struct LooseOdb {
    objects_dir: PathBuf,
}

impl LooseOdb {
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        Self { objects_dir: objects_dir.into() }
    }

    fn obj_path(&self, oid: Oid) -> PathBuf {
        let hex = oid.to_string();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }
}

impl Odb for LooseOdb {
    fn read(&self, oid: Oid) -> BitResult<Obj> {
        let path = self.obj_path(oid);
        let file = File::open(&path).map_err(|_| BitError::ObjectNotFound(oid))?;
        let mut reader = BufReader::new(ZlibDecoder::new(file));
        let (obj_type, _size) = read_header(&mut reader)?;
        Ok(match obj_type {
            ObjType::Blob => Obj::Blob(Blob::deserialize(&mut reader)?),
            ObjType::Tree => Obj::Tree(Tree::deserialize(&mut reader)?),
            ObjType::Commit => Obj::Commit(Commit::deserialize(&mut reader)?),
        })
    }

    fn write(&self, obj: &Obj) -> BitResult<Oid> {
        let mut body = vec![];
        match obj {
            Obj::Blob(blob) => blob.serialize(&mut body)?,
            Obj::Tree(tree) => tree.serialize(&mut body)?,
            Obj::Commit(commit) => commit.serialize(&mut body)?,
        }

        let oid = Oid::hash_object(&obj.obj_type().to_string(), &body);
        let path = self.obj_path(oid);
        if path.exists() {
            return Ok(oid);
        }

        Lockfile::with_mut(&path, LockfileFlags::SET_READONLY, |lockfile| {
            let mut encoder = ZlibEncoder::new(lockfile, Compression::default());
            write_header(&mut encoder, obj.obj_type(), body.len())?;
            encoder.write_all(&body)?;
            Ok(())
        })?;

        Ok(oid)
    }

    fn exists(&self, oid: Oid) -> BitResult<bool> {
        Ok(self.obj_path(oid).exists())
    }
}

fn read_header(reader: &mut impl BufRead) -> BitResult<(ObjType, usize)> {
    let mut buf = vec![];
    reader.read_until(0, &mut buf)?;
    buf.pop();
    let text = std::str::from_utf8(&buf)?;
    let (kind, size) = text.split_once(' ').ok_or_else(|| anyhow!("malformed object header"))?;
    let obj_type = match kind {
        "blob" => ObjType::Blob,
        "tree" => ObjType::Tree,
        "commit" => ObjType::Commit,
        _ => bail!("unknown object type `{}`", kind),
    };
    Ok((obj_type, size.parse()?))
}

fn write_header(writer: &mut impl Write, obj_type: ObjType, size: usize) -> BitResult<()> {
    write!(writer, "{} {}\0", obj_type, size)?;
    Ok(())
}

/// an object database held entirely in memory, used by tests that don't
/// want to touch the filesystem.
#[derive(Default)]
pub struct InMemoryOdb {
    objects: std::sync::Mutex<std::collections::HashMap<Oid, Obj>>,
}

impl InMemoryOdb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Odb for InMemoryOdb {
    fn read(&self, oid: Oid) -> BitResult<Obj> {
        self.objects
            .lock()
            .unwrap()
            .get(&oid)
            .cloned()
            .ok_or(BitError::ObjectNotFound(oid))
            .map_err(Into::into)
    }

    fn write(&self, obj: &Obj) -> BitResult<Oid> {
        let mut body = vec![];
        match obj {
            Obj::Blob(blob) => blob.serialize(&mut body)?,
            Obj::Tree(tree) => tree.serialize(&mut body)?,
            Obj::Commit(commit) => commit.serialize(&mut body)?,
        }
        let oid = Oid::hash_object(&obj.obj_type().to_string(), &body);
        self.objects.lock().unwrap().insert(oid, obj.clone());
        Ok(oid)
    }

    fn exists(&self, oid: Oid) -> BitResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(&oid))
    }
}
