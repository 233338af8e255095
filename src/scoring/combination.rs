//! Scoring combinations and the classifier that finds them.
//!
//! Rules are applied over the whole histogram in a fixed precedence:
//! three pairs, then a six-face straight, then two triplets, then the
//! per-face table. Three pairs, a straight and two triplets consume their
//! dice. A quad next to a pair scores as quad-with-pair, and a pair of 1s or
//! 5s still adds its own points on top.

use std::fmt;

use super::histogram::Histogram;
use crate::dice::{Face, ALL_FACES};

pub const THREE_PAIRS_POINTS: u32 = 1500;
pub const STRAIGHT_POINTS: u32 = 1500;
pub const TWO_TRIPLETS_POINTS: u32 = 2500;
pub const QUAD_WITH_PAIR_POINTS: u32 = 1500;
pub const QUAD_POINTS: u32 = 1000;
pub const FIVE_OF_A_KIND_POINTS: u32 = 2000;
pub const SIX_OF_A_KIND_POINTS: u32 = 3000;

/// A single scoring pattern found in a set of kept dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combination {
    /// Six dice forming exactly three pairs.
    ThreePairs,
    /// One of every face.
    Straight,
    /// Two distinct faces each showing three times.
    TwoTriplets { first: Face, second: Face },
    /// Four of one face alongside a pair of another.
    QuadWithPair { quad: Face, pair: Face },
    Single(Face),
    Pair(Face),
    Triple(Face),
    Quad(Face),
    FiveOfAKind(Face),
    SixOfAKind(Face),
}

impl Combination {
    pub fn points(self) -> u32 {
        match self {
            Combination::ThreePairs => THREE_PAIRS_POINTS,
            Combination::Straight => STRAIGHT_POINTS,
            Combination::TwoTriplets { .. } => TWO_TRIPLETS_POINTS,
            Combination::QuadWithPair { .. } => QUAD_WITH_PAIR_POINTS,
            Combination::Single(face) => match face.value() {
                1 => 100,
                5 => 50,
                _ => 0,
            },
            Combination::Pair(face) => match face.value() {
                1 => 200,
                5 => 100,
                _ => 0,
            },
            Combination::Triple(face) => match face.value() {
                1 => 300,
                v => v as u32 * 100,
            },
            Combination::Quad(_) => QUAD_POINTS,
            Combination::FiveOfAKind(_) => FIVE_OF_A_KIND_POINTS,
            Combination::SixOfAKind(_) => SIX_OF_A_KIND_POINTS,
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combination::ThreePairs => write!(f, "three-pairs"),
            Combination::Straight => write!(f, "straight"),
            Combination::TwoTriplets { first, second } => {
                write!(f, "two-triplets:{},{}", first, second)
            }
            Combination::QuadWithPair { quad, pair } => write!(f, "quad-pair:{},{}", quad, pair),
            Combination::Single(face) => write!(f, "single:{}", face),
            Combination::Pair(face) => write!(f, "pair:{}", face),
            Combination::Triple(face) => write!(f, "triple:{}", face),
            Combination::Quad(face) => write!(f, "quad:{}", face),
            Combination::FiveOfAKind(face) => write!(f, "five:{}", face),
            Combination::SixOfAKind(face) => write!(f, "six:{}", face),
        }
    }
}

/// Breaks a histogram into its scoring combinations.
///
/// Only combinations worth points are returned; an empty result means the
/// dice score nothing.
pub fn classify(hist: &Histogram) -> Vec<Combination> {
    let pairs: Vec<Face> = hist.faces_with_count(2).collect();
    if pairs.len() == 3 {
        return vec![Combination::ThreePairs];
    }
    if hist.distinct() == ALL_FACES.len() {
        return vec![Combination::Straight];
    }

    let triples: Vec<Face> = hist.faces_with_count(3).collect();
    let two_triplets = triples.len() == 2;

    let mut combos = Vec::new();
    if two_triplets {
        combos.push(Combination::TwoTriplets {
            first: triples[0],
            second: triples[1],
        });
    }

    for face in ALL_FACES {
        let combo = match hist.count(face) {
            0 => None,
            1 => Some(Combination::Single(face)),
            2 => Some(Combination::Pair(face)),
            3 if two_triplets => None,
            3 => Some(Combination::Triple(face)),
            4 => match pairs.first() {
                Some(&pair) => Some(Combination::QuadWithPair { quad: face, pair }),
                None => Some(Combination::Quad(face)),
            },
            5 => Some(Combination::FiveOfAKind(face)),
            _ => Some(Combination::SixOfAKind(face)),
        };
        if let Some(c) = combo {
            if c.points() > 0 {
                combos.push(c);
            }
        }
    }

    combos
}
