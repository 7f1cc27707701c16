#![cfg(feature = "async")]

use image::{ImageOutputFormat, Rgba, RgbaImage};
use memegen::async_api::{self, shared};
use memegen::platform::{Alert, Host, NoopDownloads, RecordingAlerts};
use memegen::{BlockId, Error, ImageFile, LoadOutcome, MemeConfig, MemeSession, Point};
use std::io::Cursor;

fn png_file(w: u32, h: u32) -> ImageFile {
    let img = RgbaImage::from_pixel(w, h, Rgba([200, 100, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    ImageFile::new(format!("{}x{}.png", w, h), "image/png", out.into_inner())
}

#[tokio::test]
async fn overlapping_uploads_apply_exactly_one() {
    let s = shared(MemeSession::default());
    let (a, b) = tokio::join!(
        async_api::upload(&s, png_file(640, 480)),
        async_api::upload(&s, png_file(32, 16)),
    );
    let outcomes = [a.unwrap(), b.unwrap()];
    let loaded: Vec<_> = outcomes
        .iter()
        .filter_map(|o| match o {
            LoadOutcome::Loaded { width, height } => Some((*width, *height)),
            LoadOutcome::Superseded => None,
        })
        .collect();
    assert_eq!(loaded.len(), 1, "one upload wins, got {:?}", outcomes);
    assert!(outcomes.contains(&LoadOutcome::Superseded));
    assert_eq!(s.lock().await.image_dimensions(), Some(loaded[0]));
}

#[tokio::test]
async fn sequential_uploads_last_one_wins() {
    let s = shared(MemeSession::default());
    async_api::upload(&s, png_file(10, 10)).await.unwrap();
    async_api::upload(&s, png_file(20, 30)).await.unwrap();
    assert_eq!(s.lock().await.image_dimensions(), Some((20, 30)));
}

#[tokio::test]
async fn editing_continues_while_decoding() {
    let s = shared(MemeSession::default());
    {
        let mut guard = s.lock().await;
        guard.upload(png_file(100, 100)).unwrap();
    }
    let pending = tokio::spawn({
        let s = s.clone();
        async move { async_api::upload(&s, png_file(200, 150)).await }
    });
    {
        let mut guard = s.lock().await;
        guard.set_text(BlockId::Top, "STILL HERE");
        guard.pointer_down(Point::new(0.0, 50.0));
        guard.pointer_up();
    }
    let out = pending.await.unwrap().unwrap();
    assert_eq!(out, LoadOutcome::Loaded { width: 200, height: 150 });
    let guard = s.lock().await;
    assert_eq!(guard.text(BlockId::Top), "STILL HERE");
    assert_eq!(guard.image_dimensions(), Some((200, 150)));
}

#[tokio::test]
async fn corrupt_upload_alerts() {
    let alerts = RecordingAlerts::new();
    let s = shared(MemeSession::new(
        MemeConfig::default(),
        Host::new(alerts.clone(), NoopDownloads),
    ));
    let res = async_api::upload(&s, ImageFile::new("x.gif", "image/gif", b"GIF89a".to_vec())).await;
    assert!(matches!(res, Err(Error::Decode(_))));
    assert_eq!(alerts.alerts(), vec![Alert::DecodeFailed]);
    assert!(!s.lock().await.has_image());
}

#[tokio::test]
async fn upload_path_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("memegen-async-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pic.png");
    std::fs::write(&path, png_file(8, 9).bytes).unwrap();

    let s = shared(MemeSession::default());
    let out = async_api::upload_path(&s, &path).await.unwrap();
    assert_eq!(out, LoadOutcome::Loaded { width: 8, height: 9 });

    let txt = dir.join("pic.txt");
    std::fs::write(&txt, b"nope").unwrap();
    assert!(matches!(async_api::upload_path(&s, &txt).await, Err(Error::InvalidFile(_))));
    std::fs::remove_dir_all(&dir).ok();
}
