use indexmap::IndexMap;

use crate::TagKind;

/// The children of a [`Tag::Compound`], keyed by name.
///
/// Insertion order is kept so trees display the way they were read, but two
/// compounds compare equal regardless of the order of their entries.
pub type Compound = IndexMap<String, Tag>;

/// Tag is one node of an NBT tree. It owns its data: compounds and lists own
/// their children outright, so a tree never shares or cycles.
///
/// The name of a root tag is not part of the tree, see
/// [`NamedTag`][crate::nbt::NamedTag] for that.
///
/// ```
/// # use dirty::{tag, Tag};
/// let item = tag!({"id": "minecraft:apple", "Count": 1i8});
/// match item.get_key("Count").unwrap() {
///     Some(Tag::Byte(count)) => println!("{} apples", count),
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Absence marker. Only valid as the element kind of an empty list, an
    /// `End` node anywhere in a tree is rejected by the codec and the writer.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(TagList),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// An NBT list: a sequence of tags along with the kind its elements are
/// declared to have.
///
/// The declared kind is [`TagKind::End`] for an empty list. Adding through
/// [`TagList::push`] keeps the list homogeneous, [`TagList::from_items`]
/// trusts the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TagList {
    element: TagKind,
    items: Vec<Tag>,
}

impl TagList {
    /// An empty list with element kind `End`.
    pub fn new() -> Self {
        Self {
            element: TagKind::End,
            items: Vec::new(),
        }
    }

    /// Build a list, declaring the kind of the first item (or `End` when
    /// empty). Items are not checked against each other.
    pub fn from_items(items: Vec<Tag>) -> Self {
        let element = items.first().map_or(TagKind::End, Tag::kind);
        Self { element, items }
    }

    /// Build a list from parts as found in binary NBT. The declared kind is
    /// kept even if it disagrees with the items.
    pub(crate) fn from_parts(element: TagKind, items: Vec<Tag>) -> Self {
        Self { element, items }
    }

    /// Build a list, failing if the items are not all of the same kind.
    pub fn try_from_items(items: Vec<Tag>) -> crate::error::Result<Self> {
        let list = Self::from_items(items);
        list.check_homogeneous()?;
        Ok(list)
    }

    pub fn element(&self) -> TagKind {
        self.element
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Tag> {
        self.items
    }

    /// Append a tag. An empty list takes on the kind of the first tag pushed
    /// into it, otherwise the tag must match the declared kind.
    pub fn push(&mut self, tag: Tag) -> crate::error::Result<&Tag> {
        self.accepts(&tag)?;
        if self.items.is_empty() {
            self.element = tag.kind();
        }
        self.items.push(tag);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replace the tag at `index`, returning the new tag.
    pub fn replace(&mut self, index: usize, tag: Tag) -> crate::error::Result<&Tag> {
        let len = self.items.len();
        if index >= len {
            return Err(crate::error::Error::index_out_of_range(index, len));
        }
        // A single element list can change kind entirely.
        if len == 1 {
            self.element = tag.kind();
        } else {
            self.accepts(&tag)?;
        }
        self.items[index] = tag;
        Ok(&self.items[index])
    }

    /// Check every item has the declared element kind.
    pub fn check_homogeneous(&self) -> crate::error::Result<()> {
        for item in &self.items {
            if item.kind() != self.element {
                return Err(crate::error::Error::heterogeneous_list(
                    self.element,
                    item.kind(),
                ));
            }
        }
        Ok(())
    }

    fn accepts(&self, tag: &Tag) -> crate::error::Result<()> {
        if self.items.is_empty() || tag.kind() == self.element {
            Ok(())
        } else {
            Err(crate::error::Error::heterogeneous_list(
                self.element,
                tag.kind(),
            ))
        }
    }
}

impl Default for TagList {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for TagList {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::End => TagKind::End,
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Tag::Byte(v) => Some(v as i64),
            Tag::Short(v) => Some(v as i64),
            Tag::Int(v) => Some(v as i64),
            Tag::Long(v) => Some(v),
            Tag::Float(v) => Some(v as i64),
            Tag::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Tag::Byte(v) => Some(v as f64),
            Tag::Short(v) => Some(v as f64),
            Tag::Int(v) => Some(v as f64),
            Tag::Long(v) => Some(v as f64),
            Tag::Float(v) => Some(v as f64),
            Tag::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            Tag::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TagList> {
        match self {
            Tag::List(v) => Some(v),
            _ => None,
        }
    }

    /// An empty compound.
    pub fn compound() -> Self {
        Tag::Compound(Compound::new())
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Tag {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(&String, String, .clone());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(TagList, List);
from!(Compound, Compound);

fn eq_i64(tag: &Tag, other: i64) -> bool {
    matches!(tag, Tag::Byte(_) | Tag::Short(_) | Tag::Int(_) | Tag::Long(_))
        && tag.as_i64() == Some(other)
}

fn eq_str(tag: &Tag, other: &str) -> bool {
    tag.as_str().map_or(false, |s| s == other)
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        eq_str(self, other)
    }
}

impl<'a> PartialEq<&'a str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        eq_str(self, other)
    }
}

macro_rules! partialeq_integer {
    ($($ty:ty)*) => {
        $(
            impl PartialEq<$ty> for Tag {
                fn eq(&self, other: &$ty) -> bool {
                    eq_i64(self, *other as i64)
                }
            }

            impl PartialEq<Tag> for $ty {
                fn eq(&self, other: &Tag) -> bool {
                    eq_i64(other, *self as i64)
                }
            }
        )*
    }
}

partialeq_integer! { i8 i16 i32 i64 }

#[cfg(feature = "arbitrary1")]
fn same_kind<'a, T, F>(u: &mut arbitrary::Unstructured<'a>, f: F) -> arbitrary::Result<Vec<Tag>>
where
    F: FnMut(T) -> Tag,
    T: arbitrary::Arbitrary<'a>,
{
    Ok(u.arbitrary_iter::<T>()?
        .collect::<arbitrary::Result<Vec<_>>>()?
        .into_iter()
        .map(f)
        .collect())
}

#[cfg(feature = "arbitrary1")]
fn arb_compound(u: &mut arbitrary::Unstructured) -> arbitrary::Result<Compound> {
    u.arbitrary_iter::<(String, Tag)>()?.collect()
}

#[cfg(feature = "arbitrary1")]
fn arb_list(u: &mut arbitrary::Unstructured) -> arbitrary::Result<TagList> {
    let items = match u.arbitrary::<TagKind>()? {
        TagKind::End => vec![],
        TagKind::Byte => same_kind(u, Tag::Byte)?,
        TagKind::Short => same_kind(u, Tag::Short)?,
        TagKind::Int => same_kind(u, Tag::Int)?,
        TagKind::Long => same_kind(u, Tag::Long)?,
        TagKind::Float => same_kind(u, Tag::Float)?,
        TagKind::Double => same_kind(u, Tag::Double)?,
        TagKind::ByteArray => same_kind(u, Tag::ByteArray)?,
        TagKind::String => same_kind(u, Tag::String)?,
        TagKind::IntArray => same_kind(u, Tag::IntArray)?,
        TagKind::LongArray => same_kind(u, Tag::LongArray)?,
        TagKind::List => {
            let len = u.arbitrary_len::<Tag>()?;
            let mut v = vec![];
            for _ in 0..len {
                v.push(Tag::List(arb_list(u)?));
            }
            v
        }
        TagKind::Compound => {
            let len = u.arbitrary_len::<Tag>()?;
            let mut v = vec![];
            for _ in 0..len {
                v.push(Tag::Compound(arb_compound(u)?));
            }
            v
        }
    };
    Ok(TagList::from_items(items))
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Tag {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(match u.arbitrary::<TagKind>()? {
            TagKind::End => return Err(arbitrary::Error::IncorrectFormat),
            TagKind::Byte => Tag::Byte(u.arbitrary()?),
            TagKind::Short => Tag::Short(u.arbitrary()?),
            TagKind::Int => Tag::Int(u.arbitrary()?),
            TagKind::Long => Tag::Long(u.arbitrary()?),
            TagKind::Float => Tag::Float(u.arbitrary()?),
            TagKind::Double => Tag::Double(u.arbitrary()?),
            TagKind::ByteArray => Tag::ByteArray(u.arbitrary()?),
            TagKind::String => Tag::String(u.arbitrary()?),
            TagKind::IntArray => Tag::IntArray(u.arbitrary()?),
            TagKind::LongArray => Tag::LongArray(u.arbitrary()?),
            TagKind::Compound => Tag::Compound(arb_compound(u)?),

            // Lists need to all be the same kind.
            TagKind::List => Tag::List(arb_list(u)?),
        })
    }
}
