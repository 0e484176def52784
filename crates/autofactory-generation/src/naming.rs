//! Factory and output file naming

use std::path::{Path, PathBuf};

use crate::scanner::Target;

/// Suffix shared by every generated file, before the extension
pub const GENERATED_SUFFIX: &str = ".Generated";

/// Factory class name for a target (`WidgetFactory`)
pub fn factory_name(target: &Target) -> String {
    format!("{}Factory", target.symbol.name)
}

/// Output file name (`WidgetFactory.Generated.cs`, ``RepositoryFactory`1.Generated.cs``)
pub fn output_file_name(target: &Target, extension: &str) -> String {
    let arity = if target.arity() > 0 {
        format!("`{}", target.arity())
    } else {
        String::new()
    };
    format!("{}{}{}.{}", factory_name(target), arity, GENERATED_SUFFIX, extension)
}

/// Absolute output path, beside the target's source file
pub fn output_path(module_root: &Path, target: &Target, extension: &str) -> PathBuf {
    let source = module_root.join(target.source_path());
    let directory = source.parent().unwrap_or(module_root);
    directory.join(output_file_name(target, extension))
}

/// Whether a file name looks like generator output
pub fn is_generated_file_name(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&format!("{}.{}", GENERATED_SUFFIX, extension)))
}
