use clap::Parser;
use dungeongen::{
    AsciiRenderer, DungeonConfig, DungeonGenerator, PngRenderer, TileRenderer, TileType,
};
use std::io::BufRead;
use std::path::PathBuf;

/// Генератор подземелий: BSP-разбиение, комнаты, коридоры
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу (TOML или JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Сид генератора (перекрывает значение из конфигурации)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Путь для сохранения PNG (по умолчанию: ./dungeon.png)
    #[arg(short, long, default_value = "dungeon.png")]
    output: PathBuf,

    /// Размер тайла в пикселях
    #[arg(long, default_value_t = 8)]
    tile_size: u32,

    /// Рисовать контуры клеток
    #[arg(long)]
    grid_lines: bool,

    /// Вывести уровень в терминал
    #[arg(long)]
    ascii: bool,

    /// Вывести подписи комнат
    #[arg(long)]
    labels: bool,

    /// Читать команды из stdin: `g` — сгенерировать заново, `q` — выйти
    #[arg(short, long)]
    interactive: bool,
}

/// Рисует одновременно в терминал и в PNG
struct Outputs {
    ascii: AsciiRenderer,
    png: PngRenderer,
}

impl TileRenderer for Outputs {
    fn reset(&mut self) {
        self.ascii.reset();
        self.png.reset();
    }

    fn place(&mut self, x: u32, y: u32, tile: TileType) {
        self.ascii.place(x, y, tile);
        self.png.place(x, y, tile);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации из {}...", path.display());
            DungeonConfig::from_file(path)?
        }
        None => DungeonConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut generator = DungeonGenerator::new(config);
    let (width, height) = (generator.config().width, generator.config().height);
    let mut png = PngRenderer::new(width, height, cli.tile_size);
    png.grid_lines = cli.grid_lines;
    let mut outputs = Outputs {
        ascii: AsciiRenderer::new(width, height),
        png,
    };

    generate(&mut generator, &mut outputs, &cli)?;

    if cli.interactive {
        println!("Команды: g — новый уровень, q — выход");
        for line in std::io::stdin().lock().lines() {
            match line?.trim() {
                "g" | "G" => generate(&mut generator, &mut outputs, &cli)?,
                "q" | "Q" => break,
                "" => {}
                other => println!("Неизвестная команда: {other}"),
            }
        }
    }

    Ok(())
}

fn generate(
    generator: &mut DungeonGenerator,
    outputs: &mut Outputs,
    cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Генерация подземелья (размер: {}×{}, разбиений: {})...",
        generator.config().width,
        generator.config().height,
        generator.config().split_count
    );
    let level = generator.generate_level(outputs)?;
    println!(
        "Комнат: {}, коридоров: {}, дверей: {}",
        level.rooms.len(),
        level.corridors.edge_count(),
        level.doors.len()
    );

    if cli.labels {
        for (anchor, label) in level.labels() {
            println!("  ({:>3}, {:>3}) {label}", anchor.x, anchor.y);
        }
    }
    if cli.ascii {
        print!("{}", outputs.ascii);
    }

    println!("Сохранение в {:?}", cli.output);
    outputs.png.save_as_png(&cli.output)?;
    println!("Готово!");
    Ok(())
}
