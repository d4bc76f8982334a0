/*
** This file is a part of Saxscan (streaming SAX tokenizer for XML)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Saxscan is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use log::LevelFilter;
use log::Metadata;
use log::Record;

use saxscan::Doctype;
use saxscan::ParseOptions;
use saxscan::SaxError;
use saxscan::SaxHandler;
use saxscan::SaxHandlerError;
use saxscan::SaxParser;
use saxscan::Span;
use saxscan::Tag;
use saxscan::XmlError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("saxlint (saxscan) v{}", VERSION);
}

fn print_usage() {
    println!(concat!(
        "Usage: saxlint [OPTIONS] [FILE.xml...]\n",
        "This tool checks the well-formedness of XML documents.\n",
        "Options:\n",
        "  -s, --stat     Overall statistics\n",
        "  -c, --count    Tag counts\n",
        "  -w, --strip    Strip whitespace from text and comments\n",
        "  -r, --raw      Do not expand entities\n",
        "  -d, --debug    Print scanner logs to stderr\n",
        "  -h, --help     Display this help message and exit\n",
        "  -v, --version  Display the version and exit"
    ));
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

struct Handler {
    do_stats: bool,
    do_tag_count: bool,
    level: usize,
    max_depth: usize,
    nr_tags: usize,
    nr_text_size: usize,
    nr_cdata_size: usize,
    nr_comments: usize,
    nr_pis: usize,
    doctype: Option<String>,
    tag_map: HashMap<String, usize>,
}

impl Handler {
    fn new(do_stats: bool, do_tag_count: bool) -> Self {
        Handler {
            do_stats,
            do_tag_count,
            level: 0,
            max_depth: 0,
            nr_tags: 0,
            nr_text_size: 0,
            nr_cdata_size: 0,
            nr_comments: 0,
            nr_pis: 0,
            doctype: None,
            tag_map: HashMap::new(),
        }
    }

    fn report(&mut self) {
        if self.do_stats {
            println!(
                "Tag pairs: {}, max depth: {}, comments: {}, processing instructions: {}",
                self.nr_tags, self.max_depth, self.nr_comments, self.nr_pis
            );
            println!(
                "Total size of text: {} bytes, character data sections: {} bytes.",
                self.nr_text_size, self.nr_cdata_size
            );
            if let Some(name) = &self.doctype {
                println!("Document type: {}", name);
            }
        }
        if self.do_tag_count {
            println!("Tag counts:");
            let mut counts: Vec<_> = self.tag_map.iter().collect();
            counts.sort();
            for (tag, count) in counts {
                println!("  {}: {}", tag, count);
            }
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.level = 0;
        self.max_depth = 0;
        self.nr_tags = 0;
        self.nr_text_size = 0;
        self.nr_cdata_size = 0;
        self.nr_comments = 0;
        self.nr_pis = 0;
        self.doctype = None;
        self.tag_map.clear();
    }
}

impl SaxHandler for Handler {
    fn text(&mut self, text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        self.nr_text_size += text.len();
        Ok(())
    }

    fn start_tag(&mut self, tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        self.nr_tags += 1;
        self.level += 1;
        self.max_depth = self.max_depth.max(self.level);
        if self.do_tag_count {
            *self.tag_map.entry(tag.name.to_string()).or_insert(0) += 1;
        }
        Ok(())
    }

    fn end_tag(&mut self, _tag: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        self.level = self.level.saturating_sub(1);
        Ok(())
    }

    fn comment(&mut self, _text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        self.nr_comments += 1;
        Ok(())
    }

    fn cdata(&mut self, text: &str, _span: Span) -> Result<(), SaxHandlerError> {
        self.nr_cdata_size += text.len();
        Ok(())
    }

    fn pi(&mut self, _pi: &Tag, _span: Span) -> Result<(), SaxHandlerError> {
        self.nr_pis += 1;
        Ok(())
    }

    fn dtd(&mut self, dtd: &Doctype, _span: Span) -> Result<(), SaxHandlerError> {
        self.doctype = Some(dtd.name.to_string());
        Ok(())
    }
}

fn print_error(file: &str, err: &XmlError) {
    let location = err.location();
    eprintln!(
        "Syntax error in file '{}' at line {} column {}: {}",
        file,
        location.lines + 1,
        location.column + 1,
        err
    );
}

struct Linter {
    handler: Handler,
    options: ParseOptions,
}

impl Linter {
    fn new(do_stats: bool, do_tag_count: bool, options: ParseOptions) -> Self {
        Linter {
            handler: Handler::new(do_stats, do_tag_count),
            options,
        }
    }

    fn read_file(file: &str, is_stream: bool) -> std::io::Result<Vec<u8>> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut buffer = Vec::new();
        f.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn lint_file(&mut self, file: &str, is_stream: bool) -> bool {
        let buffer = match Linter::read_file(file, is_stream) {
            Ok(buffer) => buffer,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", file, e);
                return false;
            }
        };

        let mut nr_errors = 0;
        let result = {
            let mut parser = SaxParser::with_options(self.options).on_error(|err| {
                nr_errors += 1;
                print_error(file, err);
            });
            parser.parse_bytes(&mut self.handler, &buffer)
        };

        match result {
            Ok(()) if nr_errors == 0 => {
                self.handler.report();
                true
            }
            Ok(()) | Err(SaxError::BadXml(_)) => {
                self.handler.reset();
                false
            }
            Err(SaxError::HandlerAbort) => {
                eprintln!("Processing of file '{}' was aborted", file);
                self.handler.reset();
                false
            }
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut do_stats = false;
    let mut do_tag_count = false;
    let mut do_debug = false;
    let mut options = ParseOptions::default();

    // Skip the first argument (program name)
    args.next();
    for arg in args {
        match arg.as_str() {
            "-s" | "--stat" => {
                do_stats = true;
            }
            "-c" | "--count" => {
                do_tag_count = true;
            }
            "-cs" | "-sc" => {
                do_stats = true;
                do_tag_count = true;
            }
            "-w" | "--strip" => {
                options.strip_whitespace = true;
            }
            "-r" | "--raw" => {
                options.expand_entities = false;
            }
            "-d" | "--debug" => {
                do_debug = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    if do_debug && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    let mut linter = Linter::new(do_stats, do_tag_count, options);
    let mut ok = true;
    if files.is_empty() {
        ok = linter.lint_file("stdin", true);
    } else {
        for file in files {
            ok &= linter.lint_file(&file, false);
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
