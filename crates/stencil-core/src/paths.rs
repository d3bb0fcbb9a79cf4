//! Path facts exposed to template expressions
//!
//! Every function here produces a flat map of camelCase bindings that
//! gets merged into the context top level, so templates can write
//! `${templateFileBasenameNoExtension}` or `${relativeOutputFile}`.
//! All emitted paths use forward slashes regardless of platform, and
//! an empty source path yields a bundle of empty strings so stale
//! facts from a previous file can be cleared by re-merging.

use serde_json::{Map, Value};

/// Suffix marking a template file as an executable module.
pub const TEMPLATE_MODULE_MARKER: &str = ".template.js";

/// Whether a template file is an executable module.
pub fn is_module_file(path: &str) -> bool {
    path.ends_with(TEMPLATE_MODULE_MARKER)
}

/// Removes the executable-module suffix from an output name.
pub fn strip_module_marker(path: &str) -> String {
    match path.strip_suffix(TEMPLATE_MODULE_MARKER) {
        Some(stem) => stem.to_string(),
        None => path.to_string(),
    }
}

/// Rewrites backslashes to forward slashes.
pub fn normalize_separator(path: &str) -> String {
    path.replace('\\', "/")
}

/// Final path component, ignoring a trailing slash.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Everything before the final component; `.` when there is none.
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None if trimmed.is_empty() && path.starts_with('/') => "/",
        None => ".",
    }
}

/// Extension of the final component including the dot; empty for
/// dotfiles and extensionless names.
pub fn extname(path: &str) -> &str {
    let base = basename(path);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[idx..],
        _ => "",
    }
}

/// Final component with its extension removed.
pub fn basename_no_ext(path: &str) -> &str {
    let base = basename(path);
    let ext = extname(path);
    &base[..base.len() - ext.len()]
}

/// Relative path from `from` to `to`, both slash-normalized.
pub fn relative_path(from: &str, to: &str) -> String {
    let from = normalize_separator(from);
    let to = normalize_separator(to);
    let from_parts: Vec<&str> = from.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    let to_parts: Vec<&str> = to.split('/').filter(|p| !p.is_empty() && *p != ".").collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_parts.len() {
        parts.push("..");
    }
    parts.extend(&to_parts[common..]);
    parts.join("/")
}

fn insert(map: &mut Map<String, Value>, key: &str, value: String) {
    map.insert(key.to_string(), Value::String(normalize_separator(&value)));
}

fn empty_bundle(keys: &[&str]) -> Map<String, Value> {
    let mut map = Map::new();
    for key in keys {
        map.insert((*key).to_string(), Value::String(String::new()));
    }
    map
}

/// Workspace-folder facts (`workspaceFolder`, `cwd`, ...).
pub fn workspace_folder_details(workspace: &str) -> Map<String, Value> {
    let workspace = normalize_separator(workspace);
    let mut map = Map::new();
    insert(&mut map, "cwd", workspace.clone());
    insert(&mut map, "workspaceFolder", workspace.clone());
    insert(&mut map, "workspaceFolderBasename", basename(&workspace).to_string());
    insert(&mut map, "workspaceFolderName", basename(&workspace).to_string());
    map
}

/// Facts about the filesystem entry the run was invoked on.
pub fn fs_path_details(workspace: &str, fs_path: &str, is_directory: bool) -> Map<String, Value> {
    let workspace = normalize_separator(workspace);
    let fs_path = normalize_separator(fs_path);
    let mut map = Map::new();
    map.insert("isDirectory".to_string(), Value::Bool(is_directory));
    map.insert("isFolder".to_string(), Value::Bool(is_directory));
    map.insert("isFile".to_string(), Value::Bool(!is_directory && !fs_path.is_empty()));
    insert(&mut map, "fsPath", fs_path.clone());
    insert(
        &mut map,
        "fsPathFolder",
        if fs_path.is_empty() {
            String::new()
        } else if is_directory {
            fs_path.clone()
        } else {
            dirname(&fs_path).to_string()
        },
    );

    let (folder, file) = if is_directory {
        (fs_path.clone(), String::new())
    } else {
        (String::new(), fs_path.clone())
    };

    insert(&mut map, "folder", folder.clone());
    insert(
        &mut map,
        "relativeFolder",
        if folder.is_empty() { String::new() } else { relative_path(&workspace, &folder) },
    );
    insert(&mut map, "folderBasename", basename(&folder).to_string());
    insert(&mut map, "folderName", basename(&folder).to_string());

    insert(&mut map, "file", file.clone());
    insert(
        &mut map,
        "fileWorkspaceFolder",
        if file.is_empty() { String::new() } else { workspace.clone() },
    );
    insert(
        &mut map,
        "relativeFile",
        if file.is_empty() { String::new() } else { relative_path(&workspace, &file) },
    );
    insert(
        &mut map,
        "relativeFileDirname",
        if file.is_empty() { String::new() } else { relative_path(&workspace, dirname(&file)) },
    );
    insert(&mut map, "fileBasename", basename(&file).to_string());
    insert(&mut map, "fileName", basename(&file).to_string());
    insert(&mut map, "fileBasenameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "fileNameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "fileExtname", extname(&file).to_string());
    insert(
        &mut map,
        "fileDirname",
        if file.is_empty() { String::new() } else { dirname(&file).to_string() },
    );
    insert(
        &mut map,
        "fileFolder",
        if file.is_empty() { String::new() } else { dirname(&file).to_string() },
    );
    insert(
        &mut map,
        "fileDirBasename",
        if file.is_empty() { String::new() } else { basename(dirname(&file)).to_string() },
    );
    insert(
        &mut map,
        "fileFolderName",
        if file.is_empty() { String::new() } else { basename(dirname(&file)).to_string() },
    );
    map
}

/// Facts about the selected template directory.
pub fn template_path_details(workspace: &str, template: &str) -> Map<String, Value> {
    if template.is_empty() {
        return empty_bundle(&["template", "relativeTemplate", "templateBasename", "templateName"]);
    }
    let template = normalize_separator(template);
    let mut map = Map::new();
    insert(&mut map, "template", template.clone());
    insert(&mut map, "relativeTemplate", relative_path(workspace, &template));
    insert(&mut map, "templateBasename", basename(&template).to_string());
    insert(&mut map, "templateName", basename(&template).to_string());
    map
}

const TEMPLATE_FILE_KEYS: &[&str] = &[
    "templateFile",
    "currentTemplateFile",
    "relativeTemplateFile",
    "relativeTemplateFileDirname",
    "relativeTemplateFileToTemplate",
    "relativeTemplateFileToTemplateDirname",
    "templateFileBasename",
    "templateFileName",
    "templateFileBasenameNoExtension",
    "templateFileNameNoExtension",
    "templateFileExtname",
    "templateFileDirname",
    "templateFileDirBasename",
    "templateFileFolderName",
];

/// Facts about the template file currently being generated.
pub fn template_file_details(
    workspace: &str,
    template: &str,
    template_file: &str,
) -> Map<String, Value> {
    if template_file.is_empty() {
        return empty_bundle(TEMPLATE_FILE_KEYS);
    }
    let file = normalize_separator(template_file);
    let mut map = Map::new();
    insert(&mut map, "templateFile", file.clone());
    insert(
        &mut map,
        "currentTemplateFile",
        format!("{}/{}", basename(template), relative_path(template, &file)),
    );
    insert(&mut map, "relativeTemplateFile", relative_path(workspace, &file));
    insert(
        &mut map,
        "relativeTemplateFileDirname",
        relative_path(workspace, dirname(&file)),
    );
    insert(
        &mut map,
        "relativeTemplateFileToTemplate",
        relative_path(template, &file),
    );
    insert(
        &mut map,
        "relativeTemplateFileToTemplateDirname",
        relative_path(template, dirname(&file)),
    );
    insert(&mut map, "templateFileBasename", basename(&file).to_string());
    insert(&mut map, "templateFileName", basename(&file).to_string());
    insert(&mut map, "templateFileBasenameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "templateFileNameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "templateFileExtname", extname(&file).to_string());
    insert(&mut map, "templateFileDirname", dirname(&file).to_string());
    insert(&mut map, "templateFileDirBasename", basename(dirname(&file)).to_string());
    insert(&mut map, "templateFileFolderName", basename(dirname(&file)).to_string());
    map
}

const PARSED_TEMPLATE_FILE_KEYS: &[&str] = &[
    "parsedTemplateFile",
    "currentParsedTemplateFile",
    "relativeParsedTemplateFile",
    "relativeParsedTemplateFileDirname",
    "relativeParsedTemplateFileToTemplate",
    "relativeParsedTemplateFileToTemplateDirname",
    "parsedTemplateFileBasename",
    "parsedTemplateFileName",
    "parsedTemplateFileBasenameNoExtension",
    "parsedTemplateFileNameNoExtension",
    "parsedTemplateFileExtname",
    "parsedTemplateFileDirname",
    "parsedTemplateFileDirBasename",
    "parsedTemplateFileFolderName",
];

/// Facts about the template file path after its own interpolation.
pub fn parsed_template_file_details(
    workspace: &str,
    template: &str,
    parsed_file: &str,
) -> Map<String, Value> {
    if parsed_file.is_empty() {
        return empty_bundle(PARSED_TEMPLATE_FILE_KEYS);
    }
    let file = normalize_separator(parsed_file);
    let mut map = Map::new();
    insert(&mut map, "parsedTemplateFile", file.clone());
    insert(
        &mut map,
        "currentParsedTemplateFile",
        format!("{}/{}", basename(template), relative_path(template, &file)),
    );
    insert(&mut map, "relativeParsedTemplateFile", relative_path(workspace, &file));
    insert(
        &mut map,
        "relativeParsedTemplateFileDirname",
        relative_path(workspace, dirname(&file)),
    );
    insert(
        &mut map,
        "relativeParsedTemplateFileToTemplate",
        relative_path(template, &file),
    );
    insert(
        &mut map,
        "relativeParsedTemplateFileToTemplateDirname",
        relative_path(template, dirname(&file)),
    );
    insert(&mut map, "parsedTemplateFileBasename", basename(&file).to_string());
    insert(&mut map, "parsedTemplateFileName", basename(&file).to_string());
    insert(
        &mut map,
        "parsedTemplateFileBasenameNoExtension",
        basename_no_ext(&file).to_string(),
    );
    insert(
        &mut map,
        "parsedTemplateFileNameNoExtension",
        basename_no_ext(&file).to_string(),
    );
    insert(&mut map, "parsedTemplateFileExtname", extname(&file).to_string());
    insert(&mut map, "parsedTemplateFileDirname", dirname(&file).to_string());
    insert(&mut map, "parsedTemplateFileDirBasename", basename(dirname(&file)).to_string());
    insert(&mut map, "parsedTemplateFileFolderName", basename(dirname(&file)).to_string());
    map
}

const OUTPUT_FILE_KEYS: &[&str] = &[
    "outputFile",
    "relativeOutputFile",
    "relativeOutputFileDirname",
    "outputFileBasename",
    "outputFileName",
    "outputFileBasenameNoExtension",
    "outputFileNameNoExtension",
    "outputFileExtname",
    "outputFileDirname",
    "outputFileFolder",
    "outputFileDirBasename",
    "outputFileFolderName",
];

/// Facts about the resolved output file.
pub fn output_file_details(workspace: &str, output_file: &str) -> Map<String, Value> {
    if output_file.is_empty() {
        return empty_bundle(OUTPUT_FILE_KEYS);
    }
    let file = normalize_separator(output_file);
    let mut map = Map::new();
    insert(&mut map, "outputFile", file.clone());
    insert(&mut map, "relativeOutputFile", relative_path(workspace, &file));
    insert(
        &mut map,
        "relativeOutputFileDirname",
        relative_path(workspace, dirname(&file)),
    );
    insert(&mut map, "outputFileBasename", basename(&file).to_string());
    insert(&mut map, "outputFileName", basename(&file).to_string());
    insert(&mut map, "outputFileBasenameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "outputFileNameNoExtension", basename_no_ext(&file).to_string());
    insert(&mut map, "outputFileExtname", extname(&file).to_string());
    insert(&mut map, "outputFileDirname", dirname(&file).to_string());
    insert(&mut map, "outputFileFolder", dirname(&file).to_string());
    insert(&mut map, "outputFileDirBasename", basename(dirname(&file)).to_string());
    insert(&mut map, "outputFileFolderName", basename(dirname(&file)).to_string());
    map
}
