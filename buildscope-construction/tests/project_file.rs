//! Integration tests for project file loading and metadata extraction.

use buildscope_construction::{ProjectFile, ProjectFileError};
use buildscope_types::{FrameworkVersion, TargetFramework};
use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write_project(temp: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(temp.path().join(name)).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn load(contents: &str) -> ProjectFile {
    ProjectFile::from_str("Test.csproj", contents).expect("parse project")
}

fn tf(moniker: &str) -> TargetFramework {
    TargetFramework::parse(moniker)
}

#[test]
fn opens_project_from_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_project(
        &temp,
        "App.csproj",
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
</Project>"#,
    );

    let project = ProjectFile::open(&path).unwrap();
    assert_eq!(project.path(), path.as_path());
    assert_eq!(project.name(), "App.csproj");
    assert_eq!(project.target_frameworks().unwrap(), &[tf("net8.0")]);
    assert_eq!(project.output_type(), Some("Exe"));
    assert!(project.uses_sdk());
    assert!(!project.is_multi_targeted());
}

#[test]
fn missing_file_is_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(temp.path().join("Missing.csproj")).unwrap();

    let err = ProjectFile::open(&path).unwrap_err();
    assert!(matches!(err, ProjectFileError::Io { .. }));
    assert!(!err.is_format_error());
}

#[test]
fn document_without_project_element_is_format_error() {
    let err = ProjectFile::from_str("Bad.csproj", "<Solution><Item/></Solution>").unwrap_err();
    assert!(matches!(err, ProjectFileError::Format { .. }));
    assert!(err.is_format_error());
}

#[test]
fn malformed_xml_is_rejected() {
    let err = ProjectFile::from_str("Bad.csproj", "<Project><PropertyGroup></Project>").unwrap_err();
    assert!(matches!(err, ProjectFileError::Xml { .. }));
}

#[test]
fn byte_order_mark_is_tolerated() {
    let project = load("\u{feff}<Project><PropertyGroup><TargetFramework>net6.0</TargetFramework></PropertyGroup></Project>");
    assert_eq!(project.target_frameworks().unwrap(), &[tf("net6.0")]);
}

#[test]
fn multi_targeting_with_redundant_single_framework() {
    let project = load(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFrameworks>net6.0;net7.0</TargetFrameworks>
    <TargetFramework>net6.0</TargetFramework>
  </PropertyGroup>
</Project>"#,
    );

    assert_eq!(
        project.target_frameworks().unwrap(),
        &[tf("net6.0"), tf("net7.0")]
    );
    assert!(project.is_multi_targeted());
}

#[test]
fn empty_target_frameworks_element_still_marks_multi_targeted() {
    let project = load(
        r#"<Project><PropertyGroup><TargetFrameworks></TargetFrameworks></PropertyGroup></Project>"#,
    );
    assert!(project.is_multi_targeted());
    assert!(project.target_frameworks().unwrap().is_empty());
}

#[test]
fn legacy_version_without_identifier_defaults_to_net_framework() {
    let project = load(
        r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <TargetFrameworkVersion>v4.8</TargetFrameworkVersion>
  </PropertyGroup>
</Project>"#,
    );

    assert_eq!(
        project.target_frameworks().unwrap(),
        &[TargetFramework::new(".NETFramework", FrameworkVersion::new(4, 8))]
    );
    assert_eq!(project.target_frameworks().unwrap(), &[tf("net48")]);
    assert_eq!(project.tools_version(), Some("15.0"));
    assert!(project.requires_net_framework());
    assert!(!project.uses_sdk());
}

#[test]
fn modern_monikers_take_priority_over_legacy_pairs() {
    let project = load(
        r#"<Project>
  <PropertyGroup>
    <TargetFrameworkVersion>v4.7.2</TargetFrameworkVersion>
    <TargetFramework>netstandard2.0</TargetFramework>
  </PropertyGroup>
</Project>"#,
    );
    assert_eq!(project.target_frameworks().unwrap(), &[tf("netstandard2.0")]);
}

#[test]
fn empty_target_framework_element_blocks_legacy_fallback() {
    let project = load(
        r#"<Project>
  <PropertyGroup>
    <TargetFramework></TargetFramework>
    <TargetFrameworkVersion>v4.8</TargetFrameworkVersion>
  </PropertyGroup>
</Project>"#,
    );
    assert_eq!(project.target_frameworks().unwrap(), &[TargetFramework::Any]);
}

#[test]
fn unparseable_legacy_version_is_a_hard_failure() {
    let project = load(
        r#"<Project><PropertyGroup><TargetFrameworkVersion>vlatest</TargetFrameworkVersion></PropertyGroup></Project>"#,
    );
    let first = project.target_frameworks().unwrap_err();
    assert!(matches!(first, ProjectFileError::Framework(_)));
    // Cached failure is reported again.
    assert!(project.target_frameworks().is_err());
    assert!(project.summary().is_err());
}

#[test]
fn no_framework_information_is_empty_not_error() {
    let project = load(r#"<Project Sdk="Microsoft.NET.Sdk"><PropertyGroup/></Project>"#);
    assert!(project.target_frameworks().unwrap().is_empty());
    assert_eq!(project.output_type(), None);
    assert_eq!(project.tools_version(), None);
}

#[test]
fn sdk_detected_on_import() {
    let project = load(
        r#"<Project>
  <Import Project="Sdk.props" Sdk="Microsoft.NET.Sdk" />
</Project>"#,
    );
    assert!(project.uses_sdk());
}

#[test]
fn portable_import_requires_net_framework() {
    let project = load(
        r#"<Project>
  <Import Project="$(MSBuildExtensionsPath32)\Microsoft\Portable\$(TargetFrameworkVersion)\Microsoft.Portable.CSharp.targets" />
</Project>"#,
    );
    assert!(project.requires_net_framework());
}

#[test]
fn language_targets_match_case_insensitively() {
    let project = load(
        r#"<Project Sdk="MSBuild.Sdk.Extras">
  <PropertyGroup>
    <LanguageTargets>$(MSBuildExtensionsPath)\microsoft.windows.ui.xaml.csharp.TARGETS</LanguageTargets>
  </PropertyGroup>
</Project>"#,
    );
    assert!(project.requires_net_framework());
}

#[test]
fn plain_sdk_project_does_not_require_net_framework() {
    let project = load(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <Import Project="Directory.Build.targets" />
</Project>"#,
    );
    assert!(!project.requires_net_framework());
}

#[test]
fn package_references_are_listed_in_document_order() {
    let project = load(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json" Version="13.0.3" />
  </ItemGroup>
  <ItemGroup Condition="'$(TargetFramework)' == 'net48'">
    <PackageReference Include="System.ValueTuple" Version="4.5.0" />
  </ItemGroup>
</Project>"#,
    );

    assert!(project.contains_package_references());
    let names: Vec<&str> = project
        .package_references()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Newtonsoft.Json", "System.ValueTuple"]);
}

#[test]
fn project_without_package_references() {
    let project = load("<Project/>");
    assert!(!project.contains_package_references());
    assert!(project.package_references().is_empty());
}

#[test]
fn summary_collects_every_property() {
    let project = load(
        r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFrameworks>net8.0;net48</TargetFrameworks>
    <OutputType>Library</OutputType>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Serilog" Version="3.1.1" />
  </ItemGroup>
</Project>"#,
    );

    let summary = project.summary().unwrap();
    assert_eq!(summary.schema, "buildscope.project.v1");
    assert_eq!(summary.name, "Test.csproj");
    assert_eq!(summary.target_frameworks, vec![tf("net8.0"), tf("net48")]);
    assert!(summary.uses_sdk);
    assert!(summary.is_multi_targeted);
    assert!(!summary.requires_net_framework);
    assert_eq!(summary.output_type.as_deref(), Some("Library"));
    assert_eq!(summary.package_references.len(), 1);
}
