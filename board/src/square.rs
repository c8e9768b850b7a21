use serde::de::Error;
use serde::de::{Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

const ASCII_LETTER_A: u8 = b'a';

/// One of the eight board columns, 'a' through 'h'.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct File(u8);

impl File {
    pub const COUNT: usize = 8;

    /// # Panics
    /// If `index` is not in `0..8`.
    pub fn new(index: usize) -> Self {
        assert!(index < Self::COUNT, "File index must be less than 8, got {}", index);

        Self(index as u8)
    }

    pub fn all() -> impl Iterator<Item = File> {
        (0..Self::COUNT).map(File::new)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn letter(&self) -> char {
        (self.0 + ASCII_LETTER_A) as char
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            c @ 'a'..='h' => Some(Self(c as u8 - ASCII_LETTER_A)),
            _ => None,
        }
    }

    /// The neighbouring file `delta` columns away, if it is on the board.
    pub fn offset(&self, delta: i8) -> Option<Self> {
        let index = self.0 as i8 + delta;
        (0..Self::COUNT as i8)
            .contains(&index)
            .then(|| Self(index as u8))
    }
}

impl FromStr for File {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_letter(c).ok_or_else(|| anyhow!("Invalid file {:?}", s)),
            _ => Err(anyhow!("File must be a single letter a-h, got {:?}", s)),
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for File {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct FileVisitor {}

impl<'de> Visitor<'de> for FileVisitor {
    type Value = File;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting a file letter from a to h.")
    }

    fn visit_char<E>(self, v: char) -> Result<Self::Value, E>
    where
        E: Error,
    {
        File::from_letter(v).ok_or_else(|| E::custom(format!("invalid file {}", v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for File {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(FileVisitor {})
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: File,
    /// Zero based, rank 1 is 0.
    pub rank: u8,
}

impl Square {
    pub fn new(file: File, rank: u8) -> Self {
        assert!(rank < 8, "Rank index must be less than 8, got {}", rank);

        Self { file, rank }
    }

    /// Index into a 64 entry board, a1 = 0, h1 = 7, a8 = 56.
    pub fn index(&self) -> usize {
        self.rank as usize * 8 + self.file.index()
    }

    pub fn from_index(index: usize) -> Self {
        assert!(index < 64, "Square index must be less than 64, got {}", index);

        Self {
            file: File::new(index % 8),
            rank: (index / 8) as u8,
        }
    }

    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file.offset(file_delta)?;
        let rank = self.rank as i8 + rank_delta;

        (0..8).contains(&rank).then(|| Self {
            file,
            rank: rank as u8,
        })
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(anyhow!("Invalid square {:?}", s));
        }

        let file = File::from_letter(chars[0]).ok_or_else(|| anyhow!("Invalid square {:?}", s))?;
        let rank = chars[1]
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .ok_or_else(|| anyhow!("Invalid square {:?}", s))?;

        Ok(Square::new(file, rank as u8 - 1))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_letters() {
        let letters: String = File::all().map(|f| f.letter()).collect();

        assert_eq!(letters, "abcdefgh");
        assert_eq!("f".parse::<File>().unwrap().index(), 5);
        assert!("i".parse::<File>().is_err());
        assert!("ab".parse::<File>().is_err());
    }

    #[test]
    #[should_panic]
    fn test_file_out_of_range_panics() {
        File::new(8);
    }

    #[test]
    fn test_file_offset_stays_on_board() {
        let a = File::new(0);
        let h = File::new(7);

        assert_eq!(a.offset(-1), None);
        assert_eq!(h.offset(1), None);
        assert_eq!(a.offset(1), Some(File::new(1)));
    }

    #[test]
    fn test_square_index_a1_h8() {
        assert_eq!("a1".parse::<Square>().unwrap().index(), 0);
        assert_eq!("h1".parse::<Square>().unwrap().index(), 7);
        assert_eq!("a8".parse::<Square>().unwrap().index(), 56);
        assert_eq!("h8".parse::<Square>().unwrap().index(), 63);
    }

    #[test]
    fn test_square_index_round_trip_all() {
        for index in 0..64 {
            assert_eq!(Square::from_index(index).index(), index);
        }
    }

    #[test]
    fn test_square_offset() {
        let f2 = "f2".parse::<Square>().unwrap();

        assert_eq!(f2.offset(0, 1), Some("f3".parse::<Square>().unwrap()));
        assert_eq!(f2.offset(-1, 1), Some("e3".parse::<Square>().unwrap()));
        assert_eq!(f2.offset(0, -2), None);
    }

    #[test]
    fn test_square_display() {
        let square = Square::new(File::new(5), 6);

        assert_eq!(square.to_string(), "f7");
        assert!("f9".parse::<Square>().is_err());
        assert!("z1".parse::<Square>().is_err());
    }

    #[test]
    fn test_file_serializes_as_letter() {
        let json = serde_json::to_string(&File::new(2)).unwrap();

        assert_eq!(json, "\"c\"");
        assert_eq!(serde_json::from_str::<File>("\"g\"").unwrap(), File::new(6));
    }
}
