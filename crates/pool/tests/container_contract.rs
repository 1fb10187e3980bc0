//! A growable array driven purely through `ElementAllocator`
//!
//! Exercises the collaborator side of the contract: allocate + construct once
//! per element span, destroy + deallocate once per span, and the propagation
//! flags on clone/move/swap.

use core::ptr::NonNull;
use std::cell::Cell;
use std::rc::Rc;

use arena_pool::allocator::{ElementAllocator, HeapAllocator, PoolAllocator, PoolConfig};
use arena_pool::PoolResult;

struct ArenaVec<T, A: ElementAllocator<T>> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
}

impl<T, A: ElementAllocator<T>> ArenaVec<T, A> {
    fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
        }
    }

    fn push(&mut self, value: T) -> PoolResult<()> {
        if self.len == self.cap {
            self.grow()?;
        }
        unsafe { self.alloc.construct(self.ptr.add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    fn grow(&mut self) -> PoolResult<()> {
        let new_cap = if self.cap == 0 { 4 } else { self.cap * 2 };
        let new_ptr = self.alloc.allocate(new_cap)?.cast::<T>();
        unsafe {
            core::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            self.alloc.deallocate(self.ptr, self.cap);
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then(|| unsafe { &*self.ptr.add(index).as_ptr() })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn swap(&mut self, other: &mut Self) {
        if <A as ElementAllocator<T>>::PROPAGATE_ON_SWAP {
            core::mem::swap(self, other);
        } else {
            // storage can only trade places between equal allocators
            assert!(self.alloc == other.alloc);
            core::mem::swap(&mut self.ptr, &mut other.ptr);
            core::mem::swap(&mut self.len, &mut other.len);
            core::mem::swap(&mut self.cap, &mut other.cap);
        }
    }
}

impl<T: Clone, A: ElementAllocator<T>> ArenaVec<T, A> {
    /// Clone-assign: reuses the target's allocator unless propagation says otherwise
    fn clone_from_other(&mut self, other: &Self) -> PoolResult<()> {
        self.clear();
        if <A as ElementAllocator<T>>::PROPAGATE_ON_CLONE_ASSIGN {
            self.release();
            self.alloc = other.alloc.clone();
        }
        for index in 0..other.len {
            if let Some(value) = other.get(index) {
                self.push(value.clone())?;
            }
        }
        Ok(())
    }
}

impl<T, A: ElementAllocator<T>> ArenaVec<T, A> {
    fn clear(&mut self) {
        for index in 0..self.len {
            unsafe { self.alloc.destroy(self.ptr.add(index)) };
        }
        self.len = 0;
    }

    fn release(&mut self) {
        if self.cap > 0 {
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T, A: ElementAllocator<T>> Drop for ArenaVec<T, A> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

/// Counts drops so every construct is matched by exactly one destroy
#[derive(Clone)]
struct Tracked {
    value: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

fn fill<A: ElementAllocator<Tracked>>(
    alloc: A,
    count: u32,
    drops: &Rc<Cell<usize>>,
) -> ArenaVec<Tracked, A> {
    let mut vec = ArenaVec::new_in(alloc);
    for value in 0..count {
        vec.push(Tracked {
            value,
            drops: Rc::clone(drops),
        })
        .unwrap();
    }
    vec
}

fn check_contract<A: ElementAllocator<Tracked>>(alloc: A) {
    let drops = Rc::new(Cell::new(0));
    {
        let vec = fill(alloc, 100, &drops);
        assert_eq!(vec.len(), 100);
        for index in 0..100 {
            assert_eq!(vec.get(index).unwrap().value, index as u32);
        }
        assert!(vec.get(100).is_none());
    }
    assert_eq!(drops.get(), 100);
}

#[test]
fn test_pool_allocator_contract() {
    let config = PoolConfig::default().with_chunk_size(8);
    check_contract(PoolAllocator::<Tracked>::with_config(config).unwrap());
}

#[test]
fn test_recycling_pool_contract() {
    check_contract(PoolAllocator::<Tracked>::with_config(PoolConfig::debug()).unwrap());
}

#[test]
fn test_heap_allocator_contract() {
    check_contract(HeapAllocator::<Tracked>::new());
}

#[test]
fn test_reserve_prewarms_pool() {
    let alloc =
        PoolAllocator::<u64>::with_config(PoolConfig::default().with_chunk_size(4)).unwrap();
    // doubling from 4 up to 64 asks for 4 + 8 + 16 + 32 + 64
    alloc.reserve(124).unwrap();
    let blocks = alloc.stats().unwrap().block_count;

    let mut vec = ArenaVec::new_in(alloc.clone());
    for value in 0..64u64 {
        vec.push(value).unwrap();
    }
    assert_eq!(alloc.stats().unwrap().block_count, blocks);
}

#[test]
fn test_heap_reserve_is_accepted() {
    HeapAllocator::<u64>::new().reserve(1_000).unwrap();
}

#[test]
fn test_swap_propagates_pool_allocator() {
    let drops = Rc::new(Cell::new(0));
    let a_alloc = PoolAllocator::<Tracked>::new().unwrap();
    let b_alloc = PoolAllocator::<Tracked>::new().unwrap();

    let mut a = fill(a_alloc.clone(), 3, &drops);
    let mut b = fill(b_alloc.clone(), 5, &drops);
    a.swap(&mut b);

    assert_eq!(a.len(), 5);
    assert!(a.alloc == b_alloc);
    assert!(b.alloc == a_alloc);
}

#[test]
fn test_swap_heap_keeps_allocators() {
    let drops = Rc::new(Cell::new(0));
    let mut a = fill(HeapAllocator::new(), 2, &drops);
    let mut b = fill(HeapAllocator::new(), 6, &drops);
    a.swap(&mut b);
    assert_eq!(a.len(), 6);
    assert_eq!(b.len(), 2);
}

#[test]
fn test_clone_assign_adopts_source_pool() {
    let drops = Rc::new(Cell::new(0));
    let source = fill(PoolAllocator::<Tracked>::new().unwrap(), 4, &drops);
    let mut target = fill(PoolAllocator::<Tracked>::new().unwrap(), 1, &drops);
    assert!(source.alloc != target.alloc);

    target.clone_from_other(&source).unwrap();
    assert!(source.alloc == target.alloc);
    assert_eq!(target.len(), 4);
    assert_eq!(target.get(3).unwrap().value, 3);
    // the one element target held before was destroyed
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_rebound_container_uses_its_own_arena() {
    let ints = PoolAllocator::<u32>::with_config(PoolConfig::recycling(16)).unwrap();
    let words: PoolAllocator<String> = ints.rebind().unwrap();

    let mut numbers = ArenaVec::new_in(ints.clone());
    let mut names = ArenaVec::new_in(words.clone());
    numbers.push(7u32).unwrap();
    names.push(String::from("seven")).unwrap();

    assert_eq!(ints.stats().unwrap().bump_allocations, 1);
    assert_eq!(words.stats().unwrap().bump_allocations, 1);
    assert!(ints != words);
}
