//! Canonical book names
//!
//! The verse-search service identifies books by number (1 = Genesis through
//! 66 = Revelation, Protestant canon order). This table is the only place
//! those numbers are turned into names.

/// Number of books in the canon
pub const BOOK_COUNT: usize = 66;

/// Book names indexed by `id - 1`
pub static BOOK_NAMES: [&str; BOOK_COUNT] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Look up the name of a book by its numeric id (1-based)
#[must_use]
pub fn book_name(id: u32) -> Option<&'static str> {
    let index = usize::try_from(id).ok()?.checked_sub(1)?;
    BOOK_NAMES.get(index).copied()
}

/// Book name for display, falling back to `Book <id>` for unknown ids
#[must_use]
pub fn display_name(id: u32) -> String {
    book_name(id).map_or_else(|| format!("Book {id}"), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_books() {
        assert_eq!(book_name(1), Some("Genesis"));
        assert_eq!(book_name(66), Some("Revelation"));
    }

    #[test]
    fn test_out_of_range_ids() {
        assert_eq!(book_name(0), None);
        assert_eq!(book_name(67), None);
        assert_eq!(book_name(u32::MAX), None);
    }

    #[test]
    fn test_testament_boundary() {
        assert_eq!(book_name(39), Some("Malachi"));
        assert_eq!(book_name(40), Some("Matthew"));
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name(43), "John");
        assert_eq!(display_name(99), "Book 99");
    }
}
