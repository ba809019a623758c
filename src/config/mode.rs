use bitflags::bitflags;
use crate::error::TrmvError;

bitflags! {
    /// Which triangle of `A` takes part in the product and how its diagonal
    /// is treated.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TriMode: u32 {
        const LOWER            = 0b0001;
        const UPPER            = 0b0010;
        const UNIT_DIAG        = 0b0100; // diagonal is 1, never read
        const ZERO_DIAG        = 0b1000; // diagonal is 0, never read
        const UNIT_LOWER       = Self::LOWER.bits() | Self::UNIT_DIAG.bits();
        const UNIT_UPPER       = Self::UPPER.bits() | Self::UNIT_DIAG.bits();
        const STRICTLY_LOWER   = Self::LOWER.bits() | Self::ZERO_DIAG.bits();
        const STRICTLY_UPPER   = Self::UPPER.bits() | Self::ZERO_DIAG.bits();
    }
}

impl TriMode {
    pub fn is_lower(self) -> bool {
        self.contains(TriMode::LOWER)
    }

    pub fn has_unit_diag(self) -> bool {
        self.contains(TriMode::UNIT_DIAG)
    }

    pub fn has_zero_diag(self) -> bool {
        self.contains(TriMode::ZERO_DIAG)
    }

    /// True when the stored diagonal of `A` is never read.
    pub fn excludes_diagonal(self) -> bool {
        self.intersects(TriMode::UNIT_DIAG | TriMode::ZERO_DIAG)
    }

    /// The mode describing the same entries of `A^T`.
    pub fn transposed(self) -> Self {
        let mut mode = self;
        mode.toggle(TriMode::LOWER | TriMode::UPPER);
        mode
    }

    pub fn validate(self) -> Result<(), TrmvError> {
        if self.contains(TriMode::LOWER) == self.contains(TriMode::UPPER) {
            return Err(TrmvError::InvalidMode("exactly one of LOWER and UPPER must be set"));
        }
        if self.contains(TriMode::UNIT_DIAG | TriMode::ZERO_DIAG) {
            return Err(TrmvError::InvalidMode("UNIT_DIAG and ZERO_DIAG are mutually exclusive"));
        }
        Ok(())
    }
}

/// Operation applied to the matrix operand before the product.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Transpose {
    /// `op(A) = A`
    #[default]
    NoTrans,
    /// `op(A) = A^T`
    Trans,
    /// `op(A) = A^H`
    ConjTrans,
}

impl Transpose {
    /// CBLAS character for the operation.
    pub fn to_char(self) -> char {
        match self {
            Transpose::NoTrans => 'N',
            Transpose::Trans => 'T',
            Transpose::ConjTrans => 'C',
        }
    }
}
