//! Dataset loading against real image files on disk.

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::Path;
use verdant_model::{load_dataset, split_dataset, DatasetParams};

fn write_pair(rgb_dir: &Path, mask_dir: &Path, name: &str, green: u8) {
    RgbImage::from_pixel(40, 30, Rgb([0, green, 0]))
        .save(rgb_dir.join(name))
        .unwrap();
    GrayImage::from_pixel(40, 30, Luma([255]))
        .save(mask_dir.join(name))
        .unwrap();
}

#[test]
fn pairs_are_matched_by_file_name() {
    let rgb = tempfile::tempdir().unwrap();
    let masks = tempfile::tempdir().unwrap();

    for (i, green) in [0u8, 51, 102, 153, 204].into_iter().enumerate() {
        write_pair(rgb.path(), masks.path(), &format!("frame_{i:04}.png"), green);
    }
    // image without a mask
    RgbImage::new(40, 30).save(rgb.path().join("orphan.png")).unwrap();
    // not an eligible extension
    std::fs::write(rgb.path().join("notes.txt"), b"ignored").unwrap();

    let params = DatasetParams {
        image_size: 16,
        ..Default::default()
    };
    let loaded = load_dataset(rgb.path(), masks.path(), params).unwrap();

    assert_eq!(loaded.dataset.len(), 5);
    assert_eq!(loaded.missing_masks.len(), 1);
    assert!(loaded.unreadable.is_empty());
    assert_eq!(loaded.dataset.images.shape(), &[5, 16, 16, 3]);
    assert_eq!(loaded.dataset.masks.shape(), &[5, 16, 16, 1]);

    // sorted by name, normalised to [0, 1]
    assert_eq!(loaded.dataset.names[2], "frame_0002.png");
    assert!((loaded.dataset.images[[2, 5, 5, 1]] - 0.4).abs() < 1e-6);
    assert!(loaded.dataset.masks.iter().all(|&v| v == 1.0));

    let split = split_dataset(&loaded.dataset, params).unwrap();
    assert_eq!(split.train.len(), 4);
    assert_eq!(split.validation.len(), 1);
}

#[test]
fn corrupt_pair_is_skipped() {
    let rgb = tempfile::tempdir().unwrap();
    let masks = tempfile::tempdir().unwrap();

    write_pair(rgb.path(), masks.path(), "good.png", 200);
    std::fs::write(rgb.path().join("bad.png"), b"garbage").unwrap();
    std::fs::write(masks.path().join("bad.png"), b"garbage").unwrap();

    let loaded = load_dataset(rgb.path(), masks.path(), DatasetParams::default()).unwrap();
    assert_eq!(loaded.dataset.names, vec!["good.png".to_string()]);
    assert_eq!(loaded.unreadable.len(), 1);
    assert!(loaded.unreadable[0].0.ends_with("bad.png"));
}
