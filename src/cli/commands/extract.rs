use anyhow::{Result, bail};

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report::print_summary};
use crate::core::{
    ExtractOptions, Extractor, OutputStrategy, Tally, context::compile_ignore_regexp,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = cmd.args;
    let options = ExtractOptions {
        verbose: args.common.verbose,
        dry_run: args.dry_run,
        output: OutputStrategy::new(
            args.output_dir,
            args.output_match_import,
            args.output_match_package,
        ),
        exclude_file: args.exclude_file,
        ignore_regexp: compile_ignore_regexp(args.ignore_regexp.as_deref())?,
        emit_catalog: args.po,
    };
    let extractor = Extractor::new(&options);

    let tally = match (args.file, args.dir) {
        (Some(file), _) => {
            if !file.is_file() {
                bail!("No such file: {}", file.display());
            }
            extractor.process_file(&file)
        }
        (None, Some(dir)) => extractor.inspect_directory(&dir, args.recursive)?,
        (None, None) => Tally::default(),
    };

    print_summary(&tally, options.dry_run);

    if tally.failed > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
