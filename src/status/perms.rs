use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{BitAnd, BitOr};

/// Permission bits, laid out like POSIX mode bits.
///
/// On platforms without a POSIX permission model the bits are derived best-effort from whatever
/// the OS reports (a read-only flag on Windows). A not-found status carries [`Perms::UNKNOWN`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, BitAnd, BitOr)]
pub struct Perms(u16);

impl Perms {
    pub const NONE: Perms = Perms(0);

    pub const OWNER_READ: Perms = Perms(0o400);
    pub const OWNER_WRITE: Perms = Perms(0o200);
    pub const OWNER_EXEC: Perms = Perms(0o100);
    pub const OWNER_ALL: Perms = Perms(0o700);

    pub const GROUP_READ: Perms = Perms(0o40);
    pub const GROUP_WRITE: Perms = Perms(0o20);
    pub const GROUP_EXEC: Perms = Perms(0o10);
    pub const GROUP_ALL: Perms = Perms(0o70);

    pub const OTHERS_READ: Perms = Perms(0o4);
    pub const OTHERS_WRITE: Perms = Perms(0o2);
    pub const OTHERS_EXEC: Perms = Perms(0o1);
    pub const OTHERS_ALL: Perms = Perms(0o7);

    pub const ALL: Perms = Perms(0o777);
    pub const SET_UID: Perms = Perms(0o4000);
    pub const SET_GID: Perms = Perms(0o2000);
    pub const STICKY_BIT: Perms = Perms(0o1000);
    pub const MASK: Perms = Perms(0o7777);

    pub const UNKNOWN: Perms = Perms(0xFFFF);

    /// Keeps only the bits covered by [`Perms::MASK`].
    pub const fn from_mode(mode: u32) -> Perms {
        Perms((mode & Perms::MASK.0 as u32) as u16)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_unknown(self) -> bool {
        self.0 == Perms::UNKNOWN.0
    }

    pub const fn contains(self, other: Perms) -> bool {
        !self.is_unknown() && self.0 & other.0 == other.0
    }
}

impl Debug for Perms {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "Perms(unknown)")
        } else {
            write!(f, "Perms(0o{:o})", self.0)
        }
    }
}

/// `ls`-style rendering of the nine access bits, e.g. `rwxr-xr--`.
impl Display for Perms {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "?????????");
        }
        for bit in (0..9).rev() {
            let ch = if self.0 & (1 << bit) != 0 {
                ['x', 'w', 'r'][bit % 3]
            } else {
                '-'
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
