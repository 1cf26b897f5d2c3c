//! Turning `PascalCase` identifiers into `snake_case` labels.

/// Split a camel case identifier into words.
///
/// A word starts at every uppercase letter that follows a non-uppercase one.
/// Runs of uppercase letters stay together as an acronym, except the last
/// letter of the run when it begins a lowercase word:
///
/// ```
/// # use dirty::naming::split_camel_case;
/// assert_eq!(split_camel_case("NetherFortress"), ["Nether", "Fortress"]);
/// assert_eq!(split_camel_case("NBTTagCompound"), ["NBT", "Tag", "Compound"]);
/// ```
pub fn split_camel_case(src: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut chars = src.char_indices();

    let mut caps = match chars.next() {
        Some((_, c)) if c.is_uppercase() => 1,
        Some(_) => 0,
        None => return words,
    };

    let mut word_start = 0;
    // Byte offset of the previous char, the start of an acronym's last letter.
    let mut prev = 0;

    for (i, c) in chars {
        if c.is_uppercase() {
            if caps == 0 {
                words.push(&src[word_start..i]);
                word_start = i;
            }
            caps += 1;
        } else {
            if caps > 1 {
                words.push(&src[word_start..prev]);
                word_start = prev;
            }
            caps = 0;
        }
        prev = i;
    }

    words.push(&src[word_start..]);
    words
}

/// Convert a camel case identifier to snake case, eg `PillagerOutpost` to
/// `pillager_outpost`. Empty input gives empty output.
pub fn to_snake_case(src: &str) -> String {
    split_camel_case(src).join("_").to_lowercase()
}
