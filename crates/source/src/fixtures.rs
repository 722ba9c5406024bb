use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Write a small archive whose entries all carry `2017-10-17 14:30:26`.
/// Names ending in `/` become directory entries.
pub(crate) fn build_archive(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    let modified = zip::DateTime::from_date_and_time(2017, 10, 17, 14, 30, 26).unwrap();
    let options = SimpleFileOptions::default().last_modified_time(modified);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}
