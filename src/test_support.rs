use std::path::{Path, PathBuf};

/// A cut-down imaging template: instructions, ordinary comments and toolkit calls.
pub(crate) const SAMPLE_TEMPLATE: &str = "\
#>>> =====================================================================
#>>>                        TEMPLATE IMAGING SCRIPT
#>>> =====================================================================
#>>>
# This script has been tested for CASA 6.1.1-15.

#>>> Lines beginning with '#>>>' are instructions to the data imager
vislist = ['uid___A002_X1_X2.ms']
  #>>> indented markers are ordinary comments
concatvis = 'calibrated.ms'
concat(vis=vislist, concatvis=concatvis)
";

/// `SAMPLE_TEMPLATE` with its instruction lines removed.
pub(crate) const SAMPLE_STRIPPED: &str = "\
# This script has been tested for CASA 6.1.1-15.

vislist = ['uid___A002_X1_X2.ms']
  #>>> indented markers are ordinary comments
concatvis = 'calibrated.ms'
concat(vis=vislist, concatvis=concatvis)
";

/// Write `content` to `dir/name` and return the path.
pub(crate) fn write_file(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Split raw bytes into lines that keep their terminators.
pub(crate) fn lines_of(bytes: &[u8]) -> Vec<Vec<u8>> {
    bytes
        .split_inclusive(|&b| b == b'\n')
        .map(<[u8]>::to_vec)
        .collect()
}
