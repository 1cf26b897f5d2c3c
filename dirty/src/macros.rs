/// Build a [`Tag`][crate::Tag] with JSON-like syntax.
///
/// Values go through `Tag::from`, so the Rust type picks the tag kind: `1i8`
/// is a `Byte`, `1` an `Int`, `1i64` a `Long` and `1.0` a `Double`. Lists
/// take the kind of their first element.
///
/// ```rust
/// use dirty::{tag, Tag};
/// let item = tag!({
///     "id": "minecraft:diamond_sword",
///     "Count": 1i8,
///     "tag": {"Damage": 3, "Enchantments": [{"id": "sharpness", "lvl": 5i16}]},
/// });
/// assert_eq!(item.get_key("Count").unwrap(), Some(&Tag::Byte(1)));
/// ```
///
/// Keys are string literals or parenthesized expressions. Arrays use the SNBT
/// prefixes:
///
/// ```rust
/// # use dirty::tag;
/// let key = String::from("longs");
/// let _ = tag!({
///     "bytes": [B; 1, 2, 3],
///     "ints": [I; 1, 2, 3],
///     (key): [L; 1, 2, 3],
/// });
/// ```
#[macro_export]
macro_rules! tag {
    ([B; $($v:expr),* $(,)?]) => {
        $crate::Tag::ByteArray(::std::vec![$($v),*])
    };

    ([I; $($v:expr),* $(,)?]) => {
        $crate::Tag::IntArray(::std::vec![$($v),*])
    };

    ([L; $($v:expr),* $(,)?]) => {
        $crate::Tag::LongArray(::std::vec![$($v),*])
    };

    ([ $($tt:tt)* ]) => {
        $crate::Tag::List($crate::TagList::from_items($crate::tag_items!([] () $($tt)*)))
    };

    ({ $($tt:tt)* }) => {{
        let mut compound = $crate::Compound::new();
        $crate::tag_entries!(compound $($tt)*);
        $crate::Tag::Compound(compound)
    }};

    // Anything with a From impl: typed numbers, strings, tags, variables.
    ($other:expr) => {
        $crate::Tag::from($other)
    };
}

// Collects the tokens of one list element at a time, up to the next comma.
#[macro_export]
#[doc(hidden)]
macro_rules! tag_items {
    ([$($done:expr,)*] ()) => {
        ::std::vec![$($done,)*]
    };

    ([$($done:expr,)*] ($($item:tt)+)) => {
        ::std::vec![$($done,)* $crate::tag!($($item)+)]
    };

    ([$($done:expr,)*] ($($item:tt)+) , $($rest:tt)*) => {
        $crate::tag_items!([$($done,)* $crate::tag!($($item)+),] () $($rest)*)
    };

    ([$($done:expr,)*] ($($item:tt)*) $next:tt $($rest:tt)*) => {
        $crate::tag_items!([$($done,)*] ($($item)* $next) $($rest)*)
    };
}

// Inserts `key: value` entries into a compound, one value token at a time.
#[macro_export]
#[doc(hidden)]
macro_rules! tag_entries {
    (@value $compound:ident $key:tt ($($value:tt)+) , $($rest:tt)*) => {
        let _ = $compound.insert(::std::string::String::from($key), $crate::tag!($($value)+));
        $crate::tag_entries!($compound $($rest)*);
    };

    (@value $compound:ident $key:tt ($($value:tt)+)) => {
        let _ = $compound.insert(::std::string::String::from($key), $crate::tag!($($value)+));
    };

    (@value $compound:ident $key:tt ($($value:tt)*) $next:tt $($rest:tt)*) => {
        $crate::tag_entries!(@value $compound $key ($($value)* $next) $($rest)*);
    };

    ($compound:ident) => {};

    ($compound:ident $key:tt : $($rest:tt)*) => {
        $crate::tag_entries!(@value $compound $key () $($rest)*);
    };
}
