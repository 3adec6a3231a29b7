//! Variable identities and the model-owned id allocator.
//!
//! Id 0 is permanently bound to the constant variable ONE (bounds fixed
//! at 1). User ids start at 1 and are issued in contiguous ascending
//! blocks, one block per dimensioned variable.

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(VariableId);

impl VariableId {
    /// Id reserved for the constant variable ONE.
    pub const CONSTANT: VariableId = VariableId(0);

    /// Canonical display token, e.g. `x7`.
    pub fn token(self) -> String {
        format!("x{}", self.0)
    }
}

/// Allocator error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocError {
    /// `allocate` was called before the constant variable was reserved.
    ConstantNotReserved,
    /// `reserve_constant` was called on an allocator that already issued ids.
    ConstantAlreadyReserved,
}

impl AllocError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AllocError::ConstantNotReserved => "ALLOC_CONSTANT_NOT_RESERVED",
            AllocError::ConstantAlreadyReserved => "ALLOC_CONSTANT_ALREADY_RESERVED",
        }
    }
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocError::ConstantNotReserved => write!(
                f,
                "[{}] Ids requested before the constant variable was reserved",
                self.code()
            ),
            AllocError::ConstantAlreadyReserved => {
                write!(f, "[{}] Constant variable is already reserved", self.code())
            }
        }
    }
}

impl std::error::Error for AllocError {}

/// A contiguous ascending block of freshly issued ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    start: u32,
    count: u32,
}

impl IdRange {
    /// First id in the block.
    pub fn start(self) -> VariableId {
        VariableId::new(self.start)
    }

    /// Number of ids in the block.
    pub fn len(self) -> usize {
        self.count as usize
    }

    pub fn is_empty(self) -> bool {
        self.count == 0
    }

    /// Ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = VariableId> {
        (self.start..self.start + self.count).map(VariableId::new)
    }
}

/// Monotonic id allocator; ids are never reused.
///
/// State lives on the owning model, not in a global. The constant
/// variable must be reserved before any user ids are issued; callers
/// validate before calling [`IdAllocator::allocate`], so a failed
/// variable creation consumes no ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    /// Fresh allocator with no ids issued and no constant reserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator with the constant variable already reserved at id 0.
    pub fn with_constant() -> Self {
        Self { next_id: 1 }
    }

    /// Reserve id 0 for the constant variable ONE.
    pub fn reserve_constant(&mut self) -> Result<VariableId, AllocError> {
        if self.next_id != 0 {
            return Err(AllocError::ConstantAlreadyReserved);
        }
        self.next_id = 1;
        Ok(VariableId::CONSTANT)
    }

    /// Issue a contiguous block of `count` fresh ids.
    pub fn allocate(&mut self, count: usize) -> Result<IdRange, AllocError> {
        if self.next_id == 0 {
            return Err(AllocError::ConstantNotReserved);
        }
        let start = self.next_id;
        self.next_id += count as u32;
        Ok(IdRange {
            start,
            count: count as u32,
        })
    }

    /// Total ids issued so far, including the reserved constant.
    pub fn issued(&self) -> usize {
        self.next_id as usize
    }
}
