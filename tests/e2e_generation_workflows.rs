//! End-to-End Test Suite: Generation Workflows
//!
//! Drives the `generate` command over temporary multi-module workspaces and
//! follows a workspace through its lifecycle: first generation, unchanged
//! reruns, source edits, target removal, and custom templates.

use std::{fs, path::Path};

use autofactory_cli::{commands::GenerateCommand, GenerateArgs};
use autofactory_orchestration::{HashStore, TargetState};
use tempfile::TempDir;

const MANIFEST: &str = r#"
modules:
  - id: app
    root: App
    dependencies: [core, data]
    types:
      - name: OrderService
        namespace: Shop.App
        imports: [Shop.Core, Shop.Data]
        interfaces: [IOrderService]
        source_path: Services/OrderService.cs
        attributes:
          - { name: GenerateFactory, arguments: ["typeof(IServiceFactory)"] }
        constructors:
          - parameters:
              - { name: repository, type: "IRepository<Order>" }
              - { name: customer, type: string, value_type: true }
            attributes:
              - { name: Inject }
  - id: core
    root: Core
    types:
      - name: IOrderService
        namespace: Shop.Core
        kind: interface
      - name: IServiceFactory
        namespace: Shop.Core
        kind: interface
        methods:
          - name: Create
            return_type: IOrderService
            parameters:
              - { name: customer, type: string, value_type: true }
            doc: ["<summary>Creates the service for a customer.</summary>"]
      - name: IRepositoryFactory
        namespace: Shop.Core
        kind: interface
        type_parameters:
          - { name: TRepository }
          - { name: TEntity, reference_type: true }
        methods:
          - name: Create
            return_type: TRepository
            parameters: []
      - name: IRepository
        namespace: Shop.Core
        kind: interface
        type_parameters:
          - { name: T }
  - id: data
    root: Data
    dependencies: [core]
    types:
      - name: Order
        namespace: Shop.Data
      - name: Repository
        namespace: Shop.Data
        imports: [Shop.Core]
        type_parameters:
          - { name: TEntity, reference_type: true }
        interfaces: ["IRepository<TEntity>"]
        source_path: Repository.cs
        attributes:
          - { name: GenerateFactoryAttribute, arguments: ["typeof(IRepositoryFactory<Repository<TEntity>, TEntity>)"] }
        constructors:
          - parameters:
              - { name: connection, type: IDbConnection }
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        for module in ["App/Services", "Core", "Data"] {
            fs::create_dir_all(dir.path().join(module)).unwrap();
        }
        fs::write(dir.path().join("App/Services/OrderService.cs"), "class OrderService {}").unwrap();
        fs::write(dir.path().join("Data/Repository.cs"), "class Repository<TEntity> {}").unwrap();
        fs::write(dir.path().join("autofactory.symbols.yaml"), MANIFEST).unwrap();
        Self { dir }
    }

    fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    fn command(&self, configure: impl FnOnce(&mut GenerateArgs)) -> GenerateCommand {
        let mut args = GenerateArgs {
            workspace: Some(self.dir.path().to_path_buf()),
            ..Default::default()
        };
        configure(&mut args);
        GenerateCommand::new(args)
    }
}

const SERVICE_FACTORY: &str = "App/Services/OrderServiceFactory.Generated.cs";
const REPOSITORY_FACTORY: &str = "Data/RepositoryFactory`1.Generated.cs";

#[tokio::test]
async fn test_generates_factories_for_every_module() {
    let workspace = Workspace::new();
    let report = workspace
        .command(|args| {
            args.attribute_import_list = Some(vec!["Inject".to_string()]);
            args.doc = true;
        })
        .run()
        .await
        .unwrap();

    assert_eq!(report.statistics.modules, 3);
    assert_eq!(report.statistics.targets, 2);
    assert_eq!(report.statistics.regenerated, 2);

    let service = workspace.read(SERVICE_FACTORY);
    assert!(service.contains("namespace Shop.App"));
    assert!(service.contains("using Shop.Core;"));
    assert!(service.contains("[Inject]"));
    assert!(service.contains("[System.Diagnostics.DebuggerNonUserCode]"));
    assert!(service.contains("private readonly IRepository<Order> repository;"));
    assert!(service.contains("/// <summary>Creates the service for a customer.</summary>"));
    assert!(service.contains("return new Shop.App.OrderService(this.repository, customer);"));

    let repository = workspace.read(REPOSITORY_FACTORY);
    assert!(repository.contains("public partial class RepositoryFactory<TEntity>"));
    assert!(repository.contains("where TEntity : class"));
    assert!(repository.contains("return new Shop.Data.Repository<TEntity>(this.connection);"));
}

#[tokio::test]
async fn test_lifecycle_skip_edit_and_removal() {
    let workspace = Workspace::new();
    workspace.command(|_| {}).run().await.unwrap();
    let first_service = workspace.read(SERVICE_FACTORY);

    let first_state = fs::read(workspace.path(".autofactory/state.json")).unwrap();

    // Unchanged rerun
    let rerun = workspace.command(|_| {}).run().await.unwrap();
    assert_eq!(rerun.statistics.skipped, 2);
    assert!(rerun.written.is_empty() && rerun.removed.is_empty());
    assert_eq!(workspace.read(SERVICE_FACTORY), first_service);
    assert_eq!(fs::read(workspace.path(".autofactory/state.json")).unwrap(), first_state);

    // Editing one source regenerates only its target
    fs::write(workspace.path("Data/Repository.cs"), "class Repository<TEntity> { }").unwrap();
    let edited = workspace.command(|_| {}).run().await.unwrap();
    let regenerated: Vec<_> = edited
        .targets_in(TargetState::Regenerated)
        .map(|t| t.target.as_str())
        .collect();
    assert_eq!(regenerated, vec!["Shop.Data.Repository"]);

    // Dropping the marker removes the factory and its state entry
    let without_repository = MANIFEST.replace(
        "        attributes:\n          - { name: GenerateFactoryAttribute, arguments: [\"typeof(IRepositoryFactory<Repository<TEntity>, TEntity>)\"] }\n",
        "",
    );
    fs::write(workspace.path("autofactory.symbols.yaml"), without_repository).unwrap();
    let removed = workspace.command(|_| {}).run().await.unwrap();
    assert_eq!(removed.removed, vec![workspace.path(REPOSITORY_FACTORY)]);
    assert!(!workspace.path(REPOSITORY_FACTORY).exists());
    assert!(workspace.path(SERVICE_FACTORY).exists());

    let state = HashStore::load(&workspace.path(".autofactory/state.json")).await.unwrap();
    assert_eq!(state.modules(), vec!["app"]);
}

#[tokio::test]
async fn test_override_template_per_contract() {
    let workspace = Workspace::new();
    fs::create_dir_all(workspace.path("templates")).unwrap();
    fs::write(
        workspace.path("templates/Shop.Core.IServiceFactory.render"),
        "[System.CodeDom.Compiler.GeneratedCode(\"AutoFactory\", \"custom\")]\n// {{class_name}} for {{target_name}}\n",
    )
    .unwrap();
    fs::write(workspace.path("autofactory.toml"), "template_dir = \"templates\"\n").unwrap();

    workspace.command(|_| {}).run().await.unwrap();

    assert!(workspace
        .read(SERVICE_FACTORY)
        .contains("// OrderServiceFactory for Shop.App.OrderService"));
    assert!(workspace.read(REPOSITORY_FACTORY).contains("public partial class RepositoryFactory"));

    // Output rendered from the override is still cataloged on the next run
    let rerun = workspace.command(|_| {}).run().await.unwrap();
    assert!(rerun.removed.is_empty());
}

#[tokio::test]
async fn test_failed_run_keeps_previous_state() {
    let workspace = Workspace::new();
    workspace.command(|_| {}).run().await.unwrap();
    let state_before = fs::read(workspace.path(".autofactory/state.json")).unwrap();

    let broken = MANIFEST.replace("typeof(IServiceFactory)", "typeof(IMissing)");
    fs::write(workspace.path("autofactory.symbols.yaml"), broken).unwrap();
    // Both sources change so neither target can be skipped
    fs::write(workspace.path("App/Services/OrderService.cs"), "class OrderService { }").unwrap();
    fs::write(workspace.path("Data/Repository.cs"), "changed").unwrap();

    let err = workspace.command(|_| {}).run().await.unwrap_err();
    assert_eq!(err.exit_code(), 10);
    assert_eq!(fs::read(workspace.path(".autofactory/state.json")).unwrap(), state_before);
}

#[tokio::test]
async fn test_json_manifest_and_custom_extension() {
    let workspace = Workspace::new();
    let json = manifest_as_json(MANIFEST);
    fs::remove_file(workspace.path("autofactory.symbols.yaml")).unwrap();
    fs::write(
        workspace.path("autofactory.symbols.json"),
        serde_json::to_string_pretty(&json).unwrap(),
    )
    .unwrap();
    fs::write(workspace.path("autofactory.toml"), "output_extension = \"g.cs\"\n").unwrap();

    workspace.command(|_| {}).run().await.unwrap();
    assert!(workspace
        .path("App/Services/OrderServiceFactory.Generated.g.cs")
        .exists());
}

#[tokio::test]
async fn test_obsolete_output_with_multi_dot_extension_is_removed() {
    let workspace = Workspace::new();
    fs::write(workspace.path("autofactory.toml"), "output_extension = \"g.cs\"\n").unwrap();
    let repository_factory = "Data/RepositoryFactory`1.Generated.g.cs";

    workspace.command(|_| {}).run().await.unwrap();
    assert!(workspace.path(repository_factory).exists());

    let without_repository = MANIFEST.replace(
        "        attributes:\n          - { name: GenerateFactoryAttribute, arguments: [\"typeof(IRepositoryFactory<Repository<TEntity>, TEntity>)\"] }\n",
        "",
    );
    fs::write(workspace.path("autofactory.symbols.yaml"), without_repository).unwrap();

    let report = workspace.command(|_| {}).run().await.unwrap();
    assert_eq!(report.removed, vec![workspace.path(repository_factory)]);
    assert!(!workspace.path(repository_factory).exists());
    assert!(workspace
        .path("App/Services/OrderServiceFactory.Generated.g.cs")
        .exists());
}

/// Converts the YAML manifest to JSON through the symbol manifest model
fn manifest_as_json(yaml: &str) -> serde_json::Value {
    let manifest =
        autofactory_symbols::WorkspaceManifest::parse(yaml, Path::new("autofactory.symbols.yaml")).unwrap();
    serde_json::to_value(&manifest).unwrap()
}
