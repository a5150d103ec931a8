//! Indexed arenas for segments and blobs.
//!
//! Both arenas hand out integer indices and keep an intrusive free list:
//! a segment's `next` field doubles as the free-list link, and a dead blob
//! reuses its list-head slot the same way (`seg_count == -1` marks it dead).
//! Exhaustion is a soft failure — `alloc` returns `None` and the caller
//! drops the candidate.

/// Sentinel for "no index" in intrusive links.
pub(crate) const NONE: i32 = -1;

/// Minimum segments a blob must have accumulated to survive once it stops
/// growing; anything smaller is discarded as noise.
pub(crate) const MIN_BLOB_SEGMENTS: i32 = 20;

/// One horizontal dark run.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Segment {
    pub y: u16,
    pub start: u16,
    pub len: u8,
    /// Owning blob index.
    pub blob: i32,
    /// Next segment of the same blob, or free-list link when unallocated.
    pub next: i32,
}

impl Segment {
    /// Last column covered by the run.
    #[inline]
    pub fn last(&self) -> u16 {
        self.start + self.len as u16 - 1
    }

    /// Horizontal interval intersection, open on the right.
    #[inline]
    pub fn overlaps(&self, other: &Segment) -> bool {
        if self.start >= other.start + other.len as u16 {
            return false;
        }
        if other.start >= self.start + self.len as u16 {
            return false;
        }
        true
    }
}

#[derive(Debug)]
pub(crate) struct SegmentArena {
    segs: Vec<Segment>,
    /// High-water mark: slots below this have been handed out at least once.
    used: usize,
    free: i32,
    cap: usize,
}

impl SegmentArena {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            segs: vec![Segment::default(); cap],
            used: 0,
            free: NONE,
            cap,
        }
    }

    pub fn reset(&mut self) {
        self.used = 0;
        self.free = NONE;
    }

    #[inline]
    pub fn get(&self, idx: i32) -> Segment {
        self.segs[idx as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: i32) -> &mut Segment {
        &mut self.segs[idx as usize]
    }

    pub fn alloc(&mut self) -> Option<i32> {
        if self.free != NONE {
            let idx = self.free;
            self.free = self.segs[idx as usize].next;
            return Some(idx);
        }
        if self.used >= self.cap {
            return None;
        }
        let idx = self.used as i32;
        self.used += 1;
        Some(idx)
    }

    pub fn dealloc(&mut self, idx: i32) {
        debug_assert!(!self.on_free_list(idx), "segment {idx} freed twice");
        self.segs[idx as usize].next = self.free;
        self.free = idx;
    }

    #[cfg(debug_assertions)]
    fn on_free_list(&self, idx: i32) -> bool {
        let mut cur = self.free;
        while cur != NONE {
            if cur == idx {
                return true;
            }
            cur = self.segs[cur as usize].next;
        }
        false
    }

    #[cfg(not(debug_assertions))]
    fn on_free_list(&self, _idx: i32) -> bool {
        false
    }
}

#[derive(Debug)]
pub(crate) struct BlobArena {
    /// Head of the intrusive segment list, or free-list link when dead.
    head: Vec<i32>,
    /// Segments owned; `-1` marks a deallocated slot.
    seg_count: Vec<i32>,
    used: usize,
    free: i32,
    cap: usize,
}

impl BlobArena {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            head: vec![NONE; cap],
            seg_count: vec![-1; cap],
            used: 0,
            free: NONE,
            cap,
        }
    }

    pub fn reset(&mut self) {
        self.used = 0;
        self.free = NONE;
        self.seg_count.fill(-1);
    }

    /// Slots handed out so far (live and dead).
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn is_live(&self, idx: i32) -> bool {
        self.seg_count[idx as usize] != -1
    }

    #[inline]
    pub fn head(&self, idx: i32) -> i32 {
        debug_assert!(self.is_live(idx));
        self.head[idx as usize]
    }

    #[inline]
    pub fn seg_count(&self, idx: i32) -> i32 {
        self.seg_count[idx as usize]
    }

    pub fn alloc(&mut self) -> Option<i32> {
        let idx = if self.free != NONE {
            let idx = self.free;
            self.free = self.head[idx as usize];
            idx
        } else {
            if self.used >= self.cap {
                return None;
            }
            let idx = self.used as i32;
            self.used += 1;
            idx
        };
        self.head[idx as usize] = NONE;
        self.seg_count[idx as usize] = 0;
        Some(idx)
    }

    /// Free a blob and return all of its segments to the segment arena.
    pub fn dealloc(&mut self, idx: i32, segs: &mut SegmentArena) {
        debug_assert!(self.is_live(idx), "blob {idx} freed twice");
        let mut seg_idx = self.head[idx as usize];
        while seg_idx != NONE {
            let next = segs.get(seg_idx).next;
            segs.dealloc(seg_idx);
            seg_idx = next;
        }
        self.head[idx as usize] = self.free;
        self.seg_count[idx as usize] = -1;
        self.free = idx;
    }

    /// Prepend a freshly filled segment to `blob`'s list.
    pub fn add_segment(&mut self, blob: i32, seg_idx: i32, segs: &mut SegmentArena) {
        let seg = segs.get_mut(seg_idx);
        seg.blob = blob;
        seg.next = self.head[blob as usize];
        self.head[blob as usize] = seg_idx;
        self.seg_count[blob as usize] += 1;
    }

    /// Merge two blobs, relabeling every segment of the loser.
    ///
    /// The blob with more segments survives; on a tie the first operand
    /// does. Returns the survivor.
    pub fn merge(&mut self, a: i32, b: i32, segs: &mut SegmentArena) -> i32 {
        debug_assert!(self.is_live(a) && self.is_live(b));
        let (main, loser) = if self.seg_count[a as usize] >= self.seg_count[b as usize] {
            (a, b)
        } else {
            (b, a)
        };

        let mut seg_idx = self.head[loser as usize];
        let mut last = NONE;
        while seg_idx != NONE {
            let seg = segs.get_mut(seg_idx);
            seg.blob = main;
            last = seg_idx;
            seg_idx = seg.next;
        }

        if last != NONE {
            segs.get_mut(last).next = self.head[main as usize];
            self.head[main as usize] = self.head[loser as usize];
        }
        self.seg_count[main as usize] += self.seg_count[loser as usize];

        // the loser's segments now belong to the survivor; free only the slot
        self.head[loser as usize] = self.free;
        self.seg_count[loser as usize] = -1;
        self.free = loser;

        main
    }

    /// Drop a blob that stopped growing if it never reached
    /// [`MIN_BLOB_SEGMENTS`]. Dead blobs are ignored.
    pub fn drop_if_small(&mut self, idx: i32, segs: &mut SegmentArena) {
        if self.seg_count[idx as usize] == -1 {
            return;
        }
        if self.seg_count[idx as usize] > MIN_BLOB_SEGMENTS {
            return;
        }
        self.dealloc(idx, segs);
    }
}
