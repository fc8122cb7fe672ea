//! Fixed-capacity scratch area for one solver, carved out of caller-provided storage.

use crate::geometry::Rotation2;

/// Scratch arrays and auxiliary index lists for a single 2D LP solve.
///
/// Borrows its storage from the caller; never allocates. Reusable across many [`crate::solve`]
/// calls via [`WorkingState::reset`].
pub struct WorkingState<'a> {
    capacity: usize,
    pub(crate) n: usize,

    pub(crate) gx: &'a mut [f64],
    pub(crate) gy: &'a mut [f64],
    pub(crate) h: &'a mut [f64],
    pub(crate) dx: &'a mut [f64],
    pub(crate) y0: &'a mut [f64],
    pub(crate) x_intersect: &'a mut [f64],

    pub(crate) ceil: &'a mut [usize],
    pub(crate) floor: &'a mut [usize],
    pub(crate) tmp: &'a mut [usize],

    pub(crate) ceil_len: usize,
    pub(crate) floor_len: usize,
    pub(crate) x_intersect_len: usize,

    pub(crate) x0: f64,
    pub(crate) x1: f64,

    pub(crate) rotation: Rotation2,
    pub(crate) offset: (f64, f64),
}

const F64_ARRAYS: usize = 6; // gx, gy, h, dx, y0, x_intersect
const USIZE_ARRAYS: usize = 3; // ceil, floor, tmp

/// Bytes of storage required for a working state able to hold `capacity` constraints.
///
/// Includes alignment slack so that [`WorkingState::init`] can always carve out the required
/// number of typed elements regardless of the caller buffer's starting alignment.
pub fn mem_size(capacity: usize) -> usize {
    let float_bytes = F64_ARRAYS * capacity * size_of::<f64>() + align_of::<f64>();
    let index_bytes = USIZE_ARRAYS * capacity * size_of::<usize>() + align_of::<usize>();
    float_bytes + index_bytes
}

fn split_mut_n(buf: &mut [f64], n: usize, parts: usize) -> Vec<&mut [f64]> {
    let mut rest = buf;
    let mut out = Vec::with_capacity(parts);
    for _ in 0..parts {
        let (head, tail) = rest.split_at_mut(n);
        out.push(head);
        rest = tail;
    }
    out
}

fn split_mut_n_usize(buf: &mut [usize], n: usize, parts: usize) -> Vec<&mut [usize]> {
    let mut rest = buf;
    let mut out = Vec::with_capacity(parts);
    for _ in 0..parts {
        let (head, tail) = rest.split_at_mut(n);
        out.push(head);
        rest = tail;
    }
    out
}

impl<'a> WorkingState<'a> {
    /// Places a working state of the given `capacity` inside caller-provided `storage`.
    ///
    /// Returns `None` when `storage` is too small (or `capacity` is zero) to hold the required
    /// arrays after alignment; a successfully returned `WorkingState` can never be null-like by
    /// construction, since it is a borrow rather than a pointer.
    pub fn init(capacity: usize, storage: &'a mut [u8]) -> Option<Self> {
        if capacity == 0 {
            return None;
        }
        let float_region_len = F64_ARRAYS * capacity * size_of::<f64>() + align_of::<f64>();
        if storage.len() < float_region_len {
            return None;
        }
        let (float_bytes, index_bytes) = storage.split_at_mut(float_region_len);

        // SAFETY: f64 has no invalid bit patterns, so any properly aligned subslice of bytes
        // may be reinterpreted as f64 without risk of producing an invalid value.
        let (_, floats, _) = unsafe { float_bytes.align_to_mut::<f64>() };
        if floats.len() < F64_ARRAYS * capacity {
            return None;
        }
        // SAFETY: usize likewise has no invalid bit patterns.
        let (_, indices, _) = unsafe { index_bytes.align_to_mut::<usize>() };
        if indices.len() < USIZE_ARRAYS * capacity {
            return None;
        }

        let mut fparts = split_mut_n(floats, capacity, F64_ARRAYS);
        let x_intersect = fparts.pop().unwrap();
        let y0 = fparts.pop().unwrap();
        let dx = fparts.pop().unwrap();
        let h = fparts.pop().unwrap();
        let gy = fparts.pop().unwrap();
        let gx = fparts.pop().unwrap();

        let mut iparts = split_mut_n_usize(indices, capacity, USIZE_ARRAYS);
        let tmp = iparts.pop().unwrap();
        let floor = iparts.pop().unwrap();
        let ceil = iparts.pop().unwrap();

        Some(Self {
            capacity,
            n: 0,
            gx,
            gy,
            h,
            dx,
            y0,
            x_intersect,
            ceil,
            floor,
            tmp,
            ceil_len: 0,
            floor_len: 0,
            x_intersect_len: 0,
            x0: f64::NEG_INFINITY,
            x1: f64::INFINITY,
            rotation: Rotation2::default(),
            offset: (0.0, 0.0),
        })
    }

    /// The configured capacity (maximum constraint count this state can hold).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clears per-solve state, ready for the next problem. Does not shrink capacity.
    pub fn reset(&mut self) {
        self.n = 0;
        self.ceil_len = 0;
        self.floor_len = 0;
        self.x_intersect_len = 0;
        self.x0 = f64::NEG_INFINITY;
        self.x1 = f64::INFINITY;
        self.rotation = Rotation2::default();
        self.offset = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_rejects_undersized_storage() {
        let mut storage = vec![0u8; 4];
        assert!(WorkingState::init(16, &mut storage).is_none());
    }

    #[test]
    fn init_rejects_zero_capacity() {
        let mut storage = vec![0u8; 4096];
        assert!(WorkingState::init(0, &mut storage).is_none());
    }

    #[test]
    fn init_succeeds_and_arrays_are_disjoint_and_sized() {
        let capacity = 8;
        let mut storage = vec![0u8; mem_size(capacity)];
        let mut ws = WorkingState::init(capacity, &mut storage).unwrap();
        assert_eq!(ws.capacity(), capacity);
        assert_eq!(ws.gx.len(), capacity);
        assert_eq!(ws.ceil.len(), capacity);
        ws.gx[0] = 1.0;
        ws.gy[0] = 2.0;
        assert_eq!(ws.gx[0], 1.0);
        assert_eq!(ws.gy[0], 2.0);
    }

    #[test]
    fn reset_clears_lengths_and_bounds() {
        let capacity = 4;
        let mut storage = vec![0u8; mem_size(capacity)];
        let mut ws = WorkingState::init(capacity, &mut storage).unwrap();
        ws.n = 4;
        ws.ceil_len = 2;
        ws.x0 = 1.0;
        ws.x1 = 2.0;
        ws.reset();
        assert_eq!(ws.n, 0);
        assert_eq!(ws.ceil_len, 0);
        assert_eq!(ws.x0, f64::NEG_INFINITY);
        assert_eq!(ws.x1, f64::INFINITY);
    }
}
