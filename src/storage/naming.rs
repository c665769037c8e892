//! Sequential resource naming
//!
//! Resources are stored as `{n}.txt` / `{n}.jpg` pairs. The next number is
//! one past the largest number present in the upload directory.

pub const CAPTION_EXTENSION: &str = "txt";
pub const IMAGE_EXTENSION: &str = "jpg";

/// Parses the number out of a `{digits}.txt` or `{digits}.jpg` file name.
///
/// Returns `None` for any other name, including digit stems of `u64::MAX` or
/// more, which leave no successor to hand out.
pub fn parse_resource_number(filename: &str) -> Option<u64> {
    let (stem, extension) = filename.rsplit_once('.')?;
    if extension != CAPTION_EXTENSION && extension != IMAGE_EXTENSION {
        return None;
    }
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok().filter(|n| *n < u64::MAX)
}

/// Next free resource number for the given directory listing
pub fn next_resource_number<I, S>(filenames: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames
        .into_iter()
        .filter_map(|name| parse_resource_number(name.as_ref()))
        .max()
        .map_or(1, |max| max + 1)
}

pub fn caption_filename(number: &str) -> String {
    format!("{number}.{CAPTION_EXTENSION}")
}

pub fn image_filename(number: &str) -> String {
    format!("{number}.{IMAGE_EXTENSION}")
}
