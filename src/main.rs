//! bookpress - Plain text to ebook converter

use std::process::ExitCode;

use clap::Parser;

use bookpress::{OutputFormat, Template, extract_text, render, structure_text, survey_text};

#[derive(Parser)]
#[command(name = "bookpress")]
#[command(version, about = "Plain text to ebook converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookpress draft.txt book.epub               Convert text to an EPUB
    bookpress draft.txt book.pdf -t elegant     Convert with the elegant template
    bookpress -i manuscript.docx                Show detected structure")]
struct Cli {
    /// Input file (.txt, .docx, or .pdf)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (.epub, .pdf, or .docx)
    #[arg(value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<String>,

    /// Visual template: classic, modern, elegant, or scifi
    #[arg(short, long, default_value = "classic")]
    template: String,

    /// Book title (extracted from the text if omitted)
    #[arg(long)]
    title: Option<String>,

    /// Author name
    #[arg(long)]
    author: Option<String>,

    /// Show detected structure without converting
    #[arg(short, long)]
    info: bool,

    /// Print the structure survey as JSON (with --info)
    #[arg(long, requires = "info")]
    json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.info {
        match show_info(&cli.input, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    } else {
        let output = cli.output.as_deref().expect("output required");
        match convert(&cli, output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

fn load_text(path: &str) -> Result<String, String> {
    let data = std::fs::read(path).map_err(|e| format!("{path}: {e}"))?;
    let (text, _format) = extract_text(&data, path).map_err(|e| e.to_string())?;
    Ok(text)
}

fn show_info(path: &str, json: bool) -> Result<(), String> {
    let text = load_text(path)?;
    let survey = survey_text(&text);

    if json {
        let rendered = serde_json::to_string_pretty(&survey).map_err(|e| e.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    let book = structure_text(&text);
    println!("File: {path}");
    println!("Title: {}", book.title);
    println!("Chapters: {}", book.chapters.len());
    for chapter in &book.chapters {
        println!(
            "  [{}] {} ({} paragraphs)",
            chapter.level,
            chapter.title,
            chapter.paragraphs.len()
        );
    }
    println!("Paragraphs: {}", book.paragraph_count());
    println!("Lines: {}", survey.total_lines);
    println!("Words: {}", survey.word_count);
    println!("Heading candidates: {}", survey.headings.len());

    Ok(())
}

fn convert(cli: &Cli, output: &str) -> Result<(), String> {
    let format = output
        .rsplit_once('.')
        .and_then(|(_, ext)| OutputFormat::from_extension(ext))
        .ok_or_else(|| format!("cannot tell output format from {output:?} (use .epub, .pdf, or .docx)"))?;

    let text = load_text(&cli.input)?;
    let template = Template::parse(&cli.template);

    let mut book = structure_text(&text);
    book.resolve_metadata(cli.title.as_deref(), cli.author.as_deref());

    let bytes = render(&book, template, format).map_err(|e| e.to_string())?;
    std::fs::write(output, &bytes).map_err(|e| format!("{output}: {e}"))?;

    if !cli.quiet {
        println!(
            "Wrote {output} ({} chapters, {} template)",
            book.chapters.len(),
            template.key()
        );
    }

    Ok(())
}
