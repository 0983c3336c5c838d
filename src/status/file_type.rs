use derive_more::{Display, IsVariant};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum FileType {
    /// The status hasn't been determined.
    #[display("none")]
    None,
    #[display("not found")]
    NotFound,
    #[display("regular file")]
    Regular,
    #[display("directory")]
    Directory,
    #[display("symlink")]
    Symlink,
    #[display("block device")]
    BlockDevice,
    #[display("character device")]
    CharDevice,
    #[display("fifo")]
    Fifo,
    #[display("socket")]
    Socket,
    #[display("unknown")]
    Unknown,
}

use FileType::{BlockDevice, CharDevice, Directory, Fifo, Regular, Socket, Symlink, Unknown};

#[cfg(unix)]
impl FileType {
    #[inline(always)]
    pub(crate) const fn from_stat_mode(st_mode: libc::mode_t) -> FileType {
        match st_mode & libc::S_IFMT {
            libc::S_IFBLK => BlockDevice,
            libc::S_IFCHR => CharDevice,
            libc::S_IFDIR => Directory,
            libc::S_IFIFO => Fifo,
            libc::S_IFLNK => Symlink,
            libc::S_IFREG => Regular,
            libc::S_IFSOCK => Socket,
            _ => Unknown,
        }
    }

    /// `DT_UNKNOWN` carries no information, so the caller has to fall back to a status query.
    pub(crate) const fn from_dirent_type(d_type: u8) -> Option<FileType> {
        Some(match d_type {
            libc::DT_BLK => BlockDevice,
            libc::DT_CHR => CharDevice,
            libc::DT_DIR => Directory,
            libc::DT_FIFO => Fifo,
            libc::DT_LNK => Symlink,
            libc::DT_REG => Regular,
            libc::DT_SOCK => Socket,
            libc::DT_UNKNOWN => return None,
            _ => Unknown,
        })
    }
}

#[cfg(any(not(unix), test))]
impl FileType {
    pub(crate) fn from_std(file_type: std::fs::FileType) -> FileType {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;

            if file_type.is_block_device() {
                return BlockDevice;
            } else if file_type.is_char_device() {
                return CharDevice;
            } else if file_type.is_fifo() {
                return Fifo;
            } else if file_type.is_socket() {
                return Socket;
            }
        }

        if file_type.is_symlink() {
            Symlink
        } else if file_type.is_dir() {
            Directory
        } else if file_type.is_file() {
            Regular
        } else {
            Unknown
        }
    }
}
