//! A contiguous growable array with a 1.5x growth factor and bounds-checked,
//! fallible accessors.
//!
//! Slots past the logical length are left uninitialized and are never read.

use std::alloc::{self, Layout};
use std::fmt;

use core::cmp;
use core::ops::{Index, IndexMut, RangeFull};
use core::ptr::{self, NonNull};
use core::{marker, mem};

use log::trace;

use crate::error::ArrayError;

/// Capacity used by [`DynamicArray::new`] and [`Default`].
pub const DEFAULT_CAPACITY: usize = 10;

/// Creates a `DynamicArray` containing the arguments, in order.
///
/// The array starts from [`DEFAULT_CAPACITY`] and grows as needed.
///
/// # Examples
///
/// ```
/// use arrays_hashing::dynamic_array;
/// use arrays_hashing::collections::DynamicArray;
///
/// let arr: DynamicArray<i32> = dynamic_array![10, 20, 30];
/// assert_eq!(arr, [10, 20, 30]);
///
/// let empty: DynamicArray<i32> = dynamic_array![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::collections::DynamicArray::new()
    };
    // `$(,)?` allows for a trailing comma.
    ($($elem:expr),+ $(,)?) => {{
        let mut arr = $crate::collections::DynamicArray::new();
        $(arr.append($elem);)+
        arr
    }};
}

/// A contiguous growable array type with heap-allocated contents.
///
/// Every index-taking operation validates its argument before touching
/// storage, so a failed call never leaves the array partially modified.
pub struct DynamicArray<T> {
    /// Slot storage. Only `[0, len)` is initialized.
    buf: RawBuffer<T>,
    /// Number of initialized elements.
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray<T>` with room for
    /// [`DEFAULT_CAPACITY`] elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::DynamicArray;
    ///
    /// let arr: DynamicArray<i32> = DynamicArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), 10);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs a new, empty `DynamicArray<T>` with exactly `capacity`
    /// slots.
    ///
    /// A capacity of zero is allowed; the first insertion then grows the
    /// array to a single slot.
    ///
    /// # Panics
    ///
    /// Panics if the requested allocation exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::collections::DynamicArray;
    ///
    /// let mut arr = DynamicArray::with_capacity(0);
    /// assert_eq!(arr.capacity(), 0);
    ///
    /// arr.append(1);
    /// assert_eq!(arr.capacity(), 1);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuffer::with_capacity(capacity),
            len: 0,
        }
    }

    /// Appends an element after the last one.
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time. When the array is full, *O*(*len*) time is
    /// taken to move the elements into an allocation 1.5 times larger.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    ///
    /// let mut arr = dynamic_array![1, 2];
    /// arr.append(3);
    /// assert_eq!(arr, [1, 2, 3]);
    /// ```
    pub fn append(&mut self, item: T) {
        if self.len == self.capacity() {
            self.buf.grow();
        }

        unsafe {
            // Offset by the previous `self.len` value.
            ptr::write(self.as_mut_ptr().add(self.len), item);
        }

        self.len += 1;
    }

    /// Inserts an element at position `index`, shifting all elements at and
    /// after it one slot to the right.
    ///
    /// `index == len` is accepted and behaves like [`append`].
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index > len`.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*len*) time in the worst case, when inserting at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    /// use arrays_hashing::error::ArrayError;
    ///
    /// let mut arr = dynamic_array![10, 20, 30];
    /// arr.insert_at(1, 15).unwrap();
    /// assert_eq!(arr, [10, 15, 20, 30]);
    ///
    /// assert_eq!(
    ///     arr.insert_at(9, 0),
    ///     Err(ArrayError::OutOfRange { index: 9, len: 4 })
    /// );
    /// ```
    ///
    /// [`append`]: DynamicArray::append
    pub fn insert_at(&mut self, index: usize, item: T) -> Result<(), ArrayError> {
        // Can be equal to `len` since inserting after all elements is valid.
        if index > self.len {
            return Err(self.out_of_range(index));
        }

        if self.len == self.capacity() {
            self.buf.grow();
        }

        unsafe {
            let base = self.as_mut_ptr();

            // Overlapping move, equivalent to shifting from the back.
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            ptr::write(base.add(index), item);
        }

        self.len += 1;

        Ok(())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    ///
    /// let arr = dynamic_array![10, 15, 20, 30];
    /// assert_eq!(arr.get(2), Ok(&20));
    /// assert!(arr.get(4).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, ArrayError> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Overwrites the element at `index`, returning the element it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    ///
    /// let mut arr = dynamic_array![10, 15, 20, 30];
    /// assert_eq!(arr.set(2, 25), Ok(20));
    /// assert_eq!(arr, [10, 15, 25, 30]);
    /// ```
    pub fn set(&mut self, index: usize, item: T) -> Result<T, ArrayError> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, item))
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Empty`] if the array has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    /// use arrays_hashing::error::ArrayError;
    ///
    /// let mut arr = dynamic_array![1, 2];
    ///
    /// assert_eq!(arr.pop(), Ok(2));
    /// assert_eq!(arr.pop(), Ok(1));
    /// assert_eq!(arr.pop(), Err(ArrayError::Empty));
    /// ```
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::Empty);
        }

        self.len -= 1;

        // The vacated slot is outside `[0, len)` and is never read again.
        unsafe { Ok(ptr::read(self.as_ptr().add(self.len))) }
    }

    /// Removes and returns the element at `index`, shifting all elements after
    /// it one slot to the left.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::OutOfRange`] if `index >= len`.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*len*) time in the worst case, when removing the first
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    ///
    /// let mut arr = dynamic_array![10, 15, 25, 30];
    /// assert_eq!(arr.remove_at(1), Ok(15));
    /// assert_eq!(arr, [10, 25, 30]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, ArrayError> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }

        self.len -= 1;

        unsafe {
            let base = self.as_mut_ptr();
            let item = ptr::read(base.add(index));

            ptr::copy(base.add(index + 1), base.add(index), self.len - index);

            Ok(item)
        }
    }

    /// Drops every element and releases the allocation, leaving both the
    /// length and the capacity at zero.
    ///
    /// The next insertion grows the array from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrays_hashing::dynamic_array;
    ///
    /// let mut arr = dynamic_array![1, 2, 3];
    /// arr.clear();
    ///
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), 0);
    ///
    /// arr.append(4);
    /// assert_eq!(arr, [4]);
    /// ```
    pub fn clear(&mut self) {
        let elems: *mut [T] = self.as_mut_slice();

        unsafe {
            // Exception Safety:
            //
            // `self.len` is set before calling `drop_in_place` so if an
            // element's Drop impl panics, the array's Drop impl will not
            // double-free.
            self.len = 0;
            ptr::drop_in_place(elems);
        }

        self.buf.release();

        trace!("cleared dynamic array, capacity reset to 0");
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements the array can hold without
    /// reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.cap
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the initialized elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Returns the initialized elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    #[inline]
    fn as_ptr(&self) -> *const T {
        self.buf.ptr.as_ptr()
    }

    #[inline]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr.as_ptr()
    }

    #[inline]
    fn out_of_range(&self, index: usize) -> ArrayError {
        ArrayError::OutOfRange {
            index,
            len: self.len,
        }
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // Not needed when `T: !Drop`.
        if mem::needs_drop::<T>() {
            unsafe {
                ptr::drop_in_place(self.as_mut_slice());
            }
        }

        // `RawBuffer` handles deallocation...
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut arr = DynamicArray::with_capacity(self.capacity());
        for elem in self.as_slice() {
            arr.append(elem.clone());
        }
        arr
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Renders the elements in order as `[a, b, c]`.
impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;

        for (i, elem) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(elem, f)?;
        }

        f.write_str("]")
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`. Use [`DynamicArray::get`] for a checked
    /// read.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
        }
    }
}

impl_slice_eq! { [] DynamicArray<T>, DynamicArray<U> }
impl_slice_eq! { [] DynamicArray<T>, &[U] }
impl_slice_eq! { [] DynamicArray<T>, [U] }
impl_slice_eq! { [const N: usize] DynamicArray<T>, [U; N] }
impl_slice_eq! { [const N: usize] DynamicArray<T>, &[U; N] }

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Index<RangeFull> for DynamicArray<T> {
    type Output = [T];

    #[inline]
    fn index(&self, _: RangeFull) -> &[T] {
        self.as_slice()
    }
}

/// Owns the slot allocation of a [`DynamicArray`] and implements its growth
/// policy.
#[derive(Debug)]
struct RawBuffer<T> {
    /// Pointer to the allocation, dangling while nothing is allocated.
    ///
    /// [`NonNull`] is covariant over `T` and is null-pointer optimized.
    ptr: NonNull<T>,
    /// Number of slots. Tracked logically for zero-sized `T`, which never
    /// allocates.
    cap: usize,
    /// In order to tell the drop checker that we do own values of type T, and
    /// therefore may drop some T's when we drop.
    _marker: marker::PhantomData<T>,
}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 || Self::IS_ZST {
            return Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _marker: marker::PhantomData,
            };
        }

        let layout = Self::layout(capacity);
        let result = unsafe { alloc::alloc(layout) };

        let ptr = match NonNull::new(result as *mut T) {
            Some(ptr) => ptr,
            // Abort the program if allocation fails.
            None => alloc::handle_alloc_error(layout),
        };

        Self {
            ptr,
            cap: capacity,
            _marker: marker::PhantomData,
        }
    }

    /// Reallocates to [`next_capacity`] slots. Existing elements keep their
    /// positions.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows or exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    ///
    /// [`next_capacity`]: RawBuffer::next_capacity
    fn grow(&mut self) {
        let new_cap = Self::next_capacity(self.cap);

        if !Self::IS_ZST {
            let new_layout = Self::layout(new_cap);

            let new_ptr = if self.cap == 0 {
                unsafe { alloc::alloc(new_layout) }
            } else {
                let old_layout = Self::layout(self.cap);
                let old_ptr = self.ptr.as_ptr() as *mut u8;
                // `realloc` copies the old contents, so `[0, len)` is
                // preserved in order.
                unsafe { alloc::realloc(old_ptr, old_layout, new_layout.size()) }
            };

            self.ptr = match NonNull::new(new_ptr as *mut T) {
                Some(ptr) => ptr,
                None => alloc::handle_alloc_error(new_layout),
            };
        }

        trace!("grew dynamic array from {} to {} slots", self.cap, new_cap);

        self.cap = new_cap;
    }

    /// `floor(cap * 1.5)`, bumped to `cap + 1` so that capacities 0 and 1
    /// still make progress.
    #[inline]
    fn next_capacity(cap: usize) -> usize {
        let scaled = cap.checked_add(cap / 2).expect("capacity overflow");
        cmp::max(scaled, cap + 1)
    }

    fn layout(capacity: usize) -> Layout {
        // `Layout::array` rejects sizes above `isize::MAX` bytes.
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => panic!("allocation too large"),
        }
    }

    /// Frees the allocation, if any, and resets the capacity to zero.
    fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            let layout = Self::layout(self.cap);
            unsafe {
                // Since `cap` > 0, there is memory allocated.
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }

        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

#[allow(dead_code)]
fn assert_properties() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}

    is_send::<DynamicArray<i32>>();
    is_sync::<DynamicArray<i32>>();

    fn covariant<'a, T>(x: DynamicArray<&'static T>) -> DynamicArray<&'a T> {
        x
    }
}
