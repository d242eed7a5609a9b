use alloc::vec::Vec;
use hashbrown::HashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::FaceSupply;
use crate::*;

/// Built-in tile decks, described only by how many faces they offer and which
/// of those must never be dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deck {
    Mahjong,
    Chess,
    Pieces,
    Cards,
}

impl Default for Deck {
    fn default() -> Self {
        Self::Mahjong
    }
}

impl Deck {
    pub fn face_set(self) -> FaceSet {
        use Deck::*;
        match self {
            // 38 is the invisible tile, 49 the block, 39 and 48 are decorative
            Mahjong => FaceSet::build(50, Face(38), &[Face(39), Face(48), Face(49)]),
            Chess => FaceSet::build(72, Face(71), &[]),
            Pieces => FaceSet::build(32, Face(28), &[]),
            Cards => FaceSet::build(64, Face(15), &[]),
        }
    }
}

/// Faces `0..count` minus the border face and any other reserved ones.
#[derive(Clone, Debug)]
pub struct FaceSet {
    border: Face,
    reserved: HashSet<Face>,
    usable: Vec<Face>,
}

impl FaceSet {
    pub fn new(count: u16, border: Face, reserved: &[Face]) -> Result<Self> {
        let faces = Self::build(count, border, reserved);
        if faces.usable.is_empty() {
            return Err(GameError::NoUsableFaces);
        }
        Ok(faces)
    }

    fn build(count: u16, border: Face, reserved: &[Face]) -> Self {
        let reserved: HashSet<Face> = reserved
            .iter()
            .copied()
            .chain(core::iter::once(border))
            .collect();
        let usable = (0..count)
            .map(Face)
            .filter(|face| !reserved.contains(face))
            .collect();
        Self {
            border,
            reserved,
            usable,
        }
    }

    pub fn usable_faces(&self) -> &[Face] {
        &self.usable
    }
}

impl From<Deck> for FaceSet {
    fn from(deck: Deck) -> Self {
        deck.face_set()
    }
}

impl FaceSupply for FaceSet {
    fn random_face<R: Rng + ?Sized>(&self, rng: &mut R) -> Face {
        self.usable[rng.random_range(0..self.usable.len())]
    }

    fn is_reserved(&self, face: Face) -> bool {
        self.reserved.contains(&face)
    }

    fn border_face(&self) -> Face {
        self.border
    }
}
