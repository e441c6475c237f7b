mod visitor;
pub use visitor::Preorder;

/// Byte offset into the source buffer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ByteOffset(pub usize);

impl From<usize> for ByteOffset {
	#[inline]
	fn from(value: usize) -> Self {
		ByteOffset(value)
	}
}

/// Accumulator that silently drops items past its limit.
#[derive(Debug)]
pub struct MaxVec<T> {
	items: Vec<T>,
	limit: usize,
}

impl<T> MaxVec<T> {
	pub fn new(limit: usize) -> Self {
		MaxVec { items: Vec::new(), limit }
	}
	#[inline]
	fn remaining_space(&self) -> usize {
		self.limit.saturating_sub(self.items.len())
	}
	#[inline]
	pub fn has_space(&self) -> bool {
		self.remaining_space() > 0
	}
	pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
		let space = self.remaining_space();
		self.items.extend(items.into_iter().take(space));
	}
	pub fn push_checked(&mut self, item: T) {
		if self.has_space() {
			self.items.push(item);
		}
	}
	#[inline]
	pub fn into_inner(self) -> Vec<T> {
		self.items
	}
}

impl<T> std::ops::Deref for MaxVec<T> {
	type Target = Vec<T>;
	#[inline]
	fn deref(&self) -> &Self::Target {
		&self.items
	}
}

#[cfg(test)]
pub fn init_for_test() {
	use std::sync::Once;
	use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

	static INIT: Once = Once::new();
	INIT.call_once(|| {
		tracing_subscriber::registry()
			.with(tracing_subscriber::fmt::layer())
			.with(EnvFilter::from("info,treescope=trace"))
			.init();
	});
}
