//! Signature-keyed converter storage.
//!
//! # Invariants
//!
//! - A signature maps to at most one entry; a different entry under an equal signature
//!   is a [`PutError::Collision`], never an overwrite.
//! - Every entry is stored under a signature that is assignable from the entry's own.
//! - Iteration follows insertion order.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::entry::ConverterEntry;
use crate::error::PutError;
use crate::signature::ConverterSignature;

type Entries = IndexMap<ConverterSignature, ConverterEntry, FxBuildHasher>;

/// Outcome of a successful insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAction {
	/// The signature was vacant; the entry is now stored.
	Inserted,
	/// The same entry was already stored under an equal signature.
	Unchanged,
}

/// Converters keyed by signature.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
	entries: Entries,
}

impl ConverterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `entry` under `signature`.
	///
	/// Re-inserting an equal entry is a no-op. Otherwise `signature` must be assignable
	/// from the entry's own signature and must not already hold a different entry.
	pub fn put(
		&mut self,
		signature: ConverterSignature,
		entry: ConverterEntry,
	) -> Result<InsertAction, PutError> {
		let action = admit(&[&*self], &signature, &entry)?;
		if action == InsertAction::Inserted {
			self.entries.insert(signature, entry);
		}
		Ok(action)
	}

	/// Stores every pair or none of them.
	///
	/// Each pair is validated against this registry and against the pairs before it;
	/// the first failure aborts the batch. Returns the number of inserted entries.
	pub fn put_all<I>(&mut self, pairs: I) -> Result<usize, PutError>
	where
		I: IntoIterator<Item = (ConverterSignature, ConverterEntry)>,
	{
		let mut staged = StagedRegistry::new(self);
		for (signature, entry) in pairs {
			staged.put(signature, entry)?;
		}
		let staged = staged.into_staged();
		Ok(self.absorb(staged))
	}

	pub fn get(&self, signature: &ConverterSignature) -> Option<&ConverterEntry> {
		self.entries.get(signature)
	}

	pub fn contains_key(&self, signature: &ConverterSignature) -> bool {
		self.entries.contains_key(signature)
	}

	/// Removes and returns the entry stored under `signature`, keeping the order of
	/// the rest.
	pub fn remove(&mut self, signature: &ConverterSignature) -> Option<ConverterEntry> {
		self.entries.shift_remove(signature)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&ConverterSignature, &ConverterEntry)> {
		self.entries.iter()
	}

	pub fn signatures(&self) -> impl Iterator<Item = &ConverterSignature> {
		self.entries.keys()
	}

	/// Every stored pair whose signature can serve `requested`, in insertion order.
	pub fn compatible(
		&self,
		requested: &ConverterSignature,
	) -> Vec<(&ConverterSignature, &ConverterEntry)> {
		self.entries
			.iter()
			.filter(|(signature, _)| signature.is_assignable_from(requested))
			.collect()
	}

	/// Moves every entry of an already validated `staged` registry into this one.
	pub(crate) fn absorb(&mut self, staged: ConverterRegistry) -> usize {
		let count = staged.len();
		self.entries.extend(staged.entries);
		count
	}
}

impl<'a> IntoIterator for &'a ConverterRegistry {
	type Item = (&'a ConverterSignature, &'a ConverterEntry);
	type IntoIter = indexmap::map::Iter<'a, ConverterSignature, ConverterEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// A scratch registry layered over a live one.
///
/// Insertions land in the scratch layer only, but collisions are checked against both
/// layers. Consume it with [`Self::into_staged`] and hand the result to the owner of the
/// live registry.
#[derive(Debug)]
pub struct StagedRegistry<'m> {
	master: &'m ConverterRegistry,
	staged: ConverterRegistry,
}

impl<'m> StagedRegistry<'m> {
	pub fn new(master: &'m ConverterRegistry) -> Self {
		Self {
			master,
			staged: ConverterRegistry::new(),
		}
	}

	/// Like [`ConverterRegistry::put`], but an entry already in the master is also
	/// unchanged, and a different one there is also a collision.
	pub fn put(
		&mut self,
		signature: ConverterSignature,
		entry: ConverterEntry,
	) -> Result<InsertAction, PutError> {
		let action = admit(&[&self.staged, self.master], &signature, &entry)?;
		if action == InsertAction::Inserted {
			self.staged.entries.insert(signature, entry);
		}
		Ok(action)
	}

	pub fn master(&self) -> &'m ConverterRegistry {
		self.master
	}

	/// Entries staged so far.
	pub fn staged(&self) -> &ConverterRegistry {
		&self.staged
	}

	/// Releases the master and returns the staged entries.
	pub fn into_staged(self) -> ConverterRegistry {
		self.staged
	}
}

/// Decides whether `entry` may be stored under `signature` given the existing layers.
fn admit(
	layers: &[&ConverterRegistry],
	signature: &ConverterSignature,
	entry: &ConverterEntry,
) -> Result<InsertAction, PutError> {
	if layers.iter().any(|layer| layer.get(signature) == Some(entry)) {
		return Ok(InsertAction::Unchanged);
	}
	if !signature.is_assignable_from(entry.signature()) {
		return Err(PutError::Incompatible {
			signature: signature.clone(),
			entry: entry.signature().clone(),
		});
	}
	if let Some(existing) = layers.iter().find_map(|layer| layer.get(signature)) {
		return Err(PutError::Collision {
			signature: signature.clone(),
			existing: Box::new(existing.clone()),
			incoming: Box::new(entry.clone()),
		});
	}
	Ok(InsertAction::Inserted)
}
