//! Abstractions for page-number pagination.

use std::{num::NonZeroUsize, ops::RangeInclusive};

use derive_more::Display;

/// Number of items on a single [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Size(NonZeroUsize);

impl Size {
    /// Creates a new [`Size`], unless the provided `size` is zero.
    #[must_use]
    pub const fn new(size: usize) -> Option<Self> {
        match NonZeroUsize::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// Returns the number of items on a [`Page`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the total number of [`Page`]s required to hold `items`.
    ///
    /// Zero items occupy zero pages.
    #[must_use]
    pub const fn pages_for(self, items: usize) -> usize {
        items.div_ceil(self.get())
    }
}

/// 1-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Number(NonZeroUsize);

impl Number {
    /// Number of the first [`Page`].
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Creates a new [`Number`], unless the provided `number` is zero.
    #[must_use]
    pub const fn new(number: usize) -> Option<Self> {
        match NonZeroUsize::new(number) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Returns this [`Number`] as a plain [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Clamps this [`Number`] into `[1, max(total_pages, 1)]`.
    #[must_use]
    pub fn clamp_to(self, total_pages: usize) -> Self {
        Self::new(self.get().min(total_pages)).unwrap_or(Self::FIRST)
    }

    /// Returns the [`Number`] following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the [`Number`] preceding this one, staying on the
    /// [`Number::FIRST`] page.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.get() - 1).unwrap_or(Self::FIRST)
    }

    /// Returns the offset of the first item of this [`Number`]ed page.
    #[must_use]
    pub const fn offset(self, size: Size) -> usize {
        (self.get() - 1).saturating_mul(size.get())
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// A page cut out of a list of `T`s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// Total number of pages in the list.
    pub total_pages: usize,

    /// Total number of items in the list.
    pub total_items: usize,
}

impl<T> Page<T> {
    /// Cuts the [`Number`]ed [`Page`] out of the provided `items`.
    ///
    /// A [`Number`] beyond the last page yields an empty [`Page`].
    #[must_use]
    pub fn cut(items: Vec<T>, number: Number, size: Size) -> Self {
        let total_items = items.len();
        Self {
            items: items
                .into_iter()
                .skip(number.offset(size))
                .take(size.get())
                .collect(),
            number,
            total_pages: size.pages_for(total_items),
            total_items,
        }
    }

    /// Indicates whether the list spans more than a single [`Page`], so
    /// navigation between pages makes sense.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    /// Indicates whether a [`Page`] precedes this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > Number::FIRST
    }

    /// Indicates whether a [`Page`] follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number.get() < self.total_pages
    }

    /// Returns the range of all page numbers in the list.
    #[must_use]
    pub fn numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }
}
