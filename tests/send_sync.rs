//! Based on: https://github.com/tokio-rs/tokio/blob/d74d17307dd53215061c4a8a1f20a0e30461e296/tokio/tests/async_send_sync.rs

#![warn(rust_2018_idioms)]

use std::{any::Any, cell::Cell};
use std::rc::Rc;

use treemap::{TreeMap, map};

fn require_send<T: Send>(_t: &T) {}
fn require_sync<T: Sync>(_t: &T) {}

struct NotSend {
    _a: Box<dyn Any + Sync>,
}

struct Invalid;

trait AmbiguousIfSend<A> {
    fn some_item(&self) {}
}
impl<T: ?Sized> AmbiguousIfSend<()> for T {}
impl<T: ?Sized + Send> AmbiguousIfSend<Invalid> for T {}

trait AmbiguousIfSync<A> {
    fn some_item(&self) {}
}
impl<T: ?Sized> AmbiguousIfSync<()> for T {}
impl<T: ?Sized + Sync> AmbiguousIfSync<Invalid> for T {}

macro_rules! assert_value {
    ($type:ty: Send & Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            require_send(&f);
            require_sync(&f);
        };
    };
    ($type:ty: !Send & Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            AmbiguousIfSend::some_item(&f);
            require_sync(&f);
        };
    };
    ($type:ty: Send & !Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            require_send(&f);
            AmbiguousIfSync::some_item(&f);
        };
    };
    ($type:ty: !Send & !Sync) => {
        #[allow(unreachable_code)]
        #[allow(unused_variables)]
        pub const _: fn() = || {
            let f: $type = todo!();
            AmbiguousIfSend::some_item(&f);
            AmbiguousIfSync::some_item(&f);
        };
    };
}

assert_value!(TreeMap<i32, i32>: Send & Sync);
assert_value!(TreeMap<Rc<i32>, i32>: !Send & !Sync);
assert_value!(TreeMap<i32, Cell<i32>>: Send & !Sync);
assert_value!(TreeMap<i32, NotSend>: !Send & Sync);

assert_value!(map::Node<'_, i32, i32>: Send & Sync);
assert_value!(map::Node<'_, Rc<i32>, i32>: !Send & !Sync);
assert_value!(map::Node<'_, Cell<i32>, i32>: !Send & !Sync);
assert_value!(map::Node<'_, i32, NotSend>: Send & Sync);

assert_value!(map::Cursor<'_, i32, i32>: Send & Sync);
assert_value!(map::Cursor<'_, Rc<i32>, i32>: !Send & !Sync);
assert_value!(map::Cursor<'_, Cell<i32>, i32>: !Send & !Sync);

assert_value!(map::Iter<'_, i32, i32>: Send & Sync);
assert_value!(map::Iter<'_, Cell<i32>, i32>: !Send & !Sync);
assert_value!(map::Iter<'_, i32, NotSend>: Send & Sync);

assert_value!(map::IterMut<'_, i32, i32>: Send & Sync);
assert_value!(map::IterMut<'_, i32, Cell<i32>>: Send & !Sync);

assert_value!(map::EntryView<'_, i32, i32>: Send & Sync);
assert_value!(map::KeyView<'_, Rc<i32>, i32>: !Send & !Sync);
assert_value!(map::ValueView<'_, i32, Cell<i32>>: !Send & !Sync);

assert_value!(map::IterPreorder<'_, i32, i32>: Send & Sync);
assert_value!(map::IterPreorder<'_, Rc<i32>, i32>: !Send & !Sync);
