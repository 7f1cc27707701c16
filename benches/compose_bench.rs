use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageOutputFormat, Rgba, RgbaImage};
use memegen::{BlockId, ImageFile, MemeSession, Point};
use std::io::Cursor;

fn session(w: u32, h: u32) -> MemeSession {
    let img = RgbaImage::from_pixel(w, h, Rgba([90, 90, 90, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    let mut s = MemeSession::default();
    s.upload(ImageFile::new("bench.png", "image/png", out.into_inner()))
        .expect("upload failed");
    s.set_text(BlockId::Top, "WHEN THE BENCHMARK");
    s.set_text(BlockId::Bottom, "FINALLY RUNS");
    s
}

// A drag redraws on every pointer move, so recomposition cost is what matters.
fn bench_drag_redraw(c: &mut Criterion) {
    let mut s = session(800, 600);
    s.pointer_down(Point::new(0.0, 50.0));
    let mut x = 0.0f32;
    c.bench_function("drag_redraw_800x600", |b| {
        b.iter(|| {
            x = (x + 1.0) % 800.0;
            s.pointer_move(Point::new(x, 120.0));
            s.frame().unwrap();
        })
    });
}

// Captions far wider than the surface only pay for the visible columns.
fn bench_long_caption_redraw(c: &mut Criterion) {
    let mut s = session(800, 600);
    s.set_text(BlockId::Top, "LONG ".repeat(20_000));
    s.pointer_down(Point::new(400.0, 50.0));
    let mut y = 60.0f32;
    c.bench_function("long_caption_redraw_800x600", |b| {
        b.iter(|| {
            y = 60.0 + (y + 1.0) % 400.0;
            s.pointer_move(Point::new(400.0, y));
            s.frame().unwrap();
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let mut s = session(800, 600);
    c.bench_function("export_png_800x600", |b| {
        b.iter(|| {
            let _ = s.render().unwrap();
        })
    });
}

criterion_group!(benches, bench_drag_redraw, bench_long_caption_redraw, bench_export);
criterion_main!(benches);
