use texgen::{
    BlurParams, CombineOp, Filter, NoiseMode, NoiseParams, Parallelogram, PerlinTable,
    Texture, blur, linear_gradient, noise, paste, random_voronoi,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let out_dir = std::path::Path::new("target").join("render_tile");
    std::fs::create_dir_all(&out_dir)?;

    let ramp = linear_gradient(0xff10_2040, 0xffe0_f0ff)?;
    let mut clouds = Texture::new(128, 128)?;
    let params = NoiseParams {
        freq_x: 1,
        freq_y: 1,
        octaves: 5,
        fadeoff: 0.6,
        seed: 7,
        mode: NoiseMode::default(),
    };
    noise(&mut clouds, &ramp, &params, PerlinTable::shared())?;

    let white = linear_gradient(0xffff_ffff, 0xffff_ffff)?;
    let mut cells = Texture::new(128, 128)?;
    random_voronoi(&mut cells, &white, 255, 48, 0.08, 11)?;
    let mut soft = Texture::new(128, 128)?;
    blur(&mut soft, &cells, &BlurParams::new(0.02, 0.02, 2))?;

    let mut tile = Texture::new(128, 128)?;
    paste(
        &mut tile,
        &clouds,
        &soft,
        &Parallelogram::FULL,
        CombineOp::Multiply,
        Filter::Bilinear,
    )?;

    for (name, tex) in [("clouds", &clouds), ("cells", &cells), ("tile", &tile)] {
        let path = out_dir.join(format!("{name}.png"));
        texgen::save(tex, &path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
