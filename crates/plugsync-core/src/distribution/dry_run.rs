use std::fmt;
use std::path::PathBuf;

/// Something simulate mode can describe instead of performing
pub trait DryRunnable {
    /// One line, phrased as "Would ..."
    fn dry_run_description(&self) -> String;

    /// Bytes the operation would add to the disk
    fn estimated_disk_usage(&self) -> u64 {
        0
    }
}

/// Types of file operations a run can plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperationType {
    CreateDir,
    Copy,
}

/// A filesystem mutation that simulate mode records instead of performing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOperation {
    pub operation_type: FileOperationType,
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    /// Bytes the operation would write
    pub size: u64,
}

impl FileOperation {
    pub fn copy(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            operation_type: FileOperationType::Copy,
            source: source.into(),
            destination: Some(destination.into()),
            size,
        }
    }

    pub fn create_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            operation_type: FileOperationType::CreateDir,
            source: path.into(),
            destination: None,
            size: 0,
        }
    }
}

impl DryRunnable for FileOperation {
    fn dry_run_description(&self) -> String {
        match self.operation_type {
            FileOperationType::CreateDir => {
                format!("Would create directory {}", self.source.display())
            }
            FileOperationType::Copy => match &self.destination {
                Some(dest) => format!("Would copy {} to {}", self.source.display(), dest.display()),
                None => format!("Would copy {}", self.source.display()),
            },
        }
    }

    fn estimated_disk_usage(&self) -> u64 {
        if self.operation_type == FileOperationType::Copy {
            self.size
        } else {
            0
        }
    }
}

/// Summary report of a simulated run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunReport {
    pub descriptions: Vec<String>,
    pub copies_count: usize,
    pub estimated_disk_usage: u64,
}

impl DryRunReport {
    /// Builds a report from planned operations, in the order given
    pub fn from_operations<'a, I>(operations: I) -> Self
    where
        I: IntoIterator<Item = &'a FileOperation>,
    {
        let mut report = DryRunReport {
            descriptions: Vec::new(),
            copies_count: 0,
            estimated_disk_usage: 0,
        };
        for operation in operations {
            if operation.operation_type == FileOperationType::Copy {
                report.copies_count += 1;
            }
            report.estimated_disk_usage += operation.estimated_disk_usage();
            report.descriptions.push(operation.dry_run_description());
        }
        report
    }
}

impl fmt::Display for DryRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        writeln!(f, "===================")?;
        for description in &self.descriptions {
            writeln!(f, "  {}", description)?;
        }
        writeln!(f, "Total copies: {}", self.copies_count)?;
        writeln!(f, "Estimated disk usage: {} bytes", self.estimated_disk_usage)?;
        writeln!(f, "\nTo execute these changes, run the same command without --simulate.")
    }
}
