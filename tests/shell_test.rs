use shipflex_offer::core::offer::ExportFormat;
use shipflex_offer::domain::ports::Storage;
use shipflex_offer::{
    load_catalog, Catalog, CatalogOption, Category, Console, LocalStorage, OfferError, Result, Shell, ShellSettings,
};
use std::io::Cursor;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/options.json");

fn catalog() -> Catalog {
    load_catalog(FIXTURE).unwrap()
}

/// 不允許任何寫入的 storage，用來確認沒有觸發存檔
struct NoStorage;

impl Storage for NoStorage {
    fn write_file(&self, path: &str, _data: &[u8]) -> Result<String> {
        panic!("unexpected write to {}", path);
    }
}

fn run_session<S: Storage>(catalog: &Catalog, storage: S, settings: ShellSettings, input: &str) -> (Result<()>, String) {
    let console = Console::new(Cursor::new(input.to_string()), Vec::new(), false);
    let mut shell = Shell::new(catalog, console, storage, settings);
    let result = shell.run();
    let output = String::from_utf8(shell.into_terminal().into_writer()).unwrap();
    (result, output)
}

#[test]
fn test_exit_immediately() {
    let catalog = catalog();
    let (result, output) = run_session(&catalog, NoStorage, ShellSettings::default(), "4\n");

    assert!(result.is_ok());
    assert!(output.contains("Welcome to the ShipFlex offer assistant."));
    assert!(output.ends_with("Choice (1-4): "));
}

#[test]
fn test_customer_types_and_all_options() {
    let catalog = catalog();
    let (result, output) =
        run_session(&catalog, NoStorage, ShellSettings::default(), "1\n\n2\n\n4\n");

    assert!(result.is_ok());
    assert!(output.contains("Customer types:\n\t1. Private.\n\t2. Company.\n\n"));
    assert!(output.contains("---- Essential Categories ----\n\nHull\n\n"));
    assert!(output.contains("---- Extra Categories ----\n\nNavigation\n\n"));
    assert!(output.contains("\t1. Steel        9000 EUR\n"));

    let essential_at = output.find("Essential Categories").unwrap();
    let extra_at = output.find("Extra Categories").unwrap();
    assert!(essential_at < extra_at);
    assert_eq!(output.matches("Welcome to the ShipFlex offer assistant.").count(), 3);
}

#[test]
fn test_invalid_menu_input_reprompts() {
    let catalog = catalog();
    let (result, output) =
        run_session(&catalog, NoStorage, ShellSettings::default(), "9\n\nabc\n\n4\n");

    assert!(result.is_ok());
    assert!(output.contains("The input '9' is out of bounds. Please choose a number between 1 and 4."));
    assert!(output.contains("The input 'abc' is not a numeric value."));
}

#[test]
fn test_closed_input_ends_session_with_error() {
    let catalog = catalog();
    let (result, _) = run_session(&catalog, NoStorage, ShellSettings::default(), "2\n");

    match result {
        Err(err @ OfferError::InputClosed) => assert_eq!(err.exit_code(), 4),
        other => panic!("expected input closed, got {:?}", other),
    }
}

#[test]
fn test_offer_without_extras_and_without_saving() {
    let catalog = catalog();
    let console = Console::new(
        Cursor::new("1\n0\n0\n\n\nn\n\n".to_string()),
        Vec::new(),
        false,
    );
    let mut shell = Shell::new(&catalog, console, NoStorage, ShellSettings::default());

    let offer = shell.generate_offer().unwrap();

    assert_eq!(offer.customer_type, "Private");
    assert_eq!(offer.lines.len(), 2);
    assert_eq!(offer.lines[0].option_name, "Aluminium");
    assert_eq!(offer.lines[1].option_name, "Diesel");
    assert_eq!(offer.total, 14500);

    let output = String::from_utf8(shell.into_terminal().into_writer()).unwrap();
    assert!(output.contains("Include extra category 'Navigation'?\n\nChoice (y/N): "));
    assert!(output.contains("Should offer be saved to a file?\n\nChoice (Y/n): "));
    assert!(!output.contains("Offer saved to:"));
}

#[test]
fn test_full_offer_session_saves_files() {
    let catalog = catalog();
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let settings = ShellSettings {
        formats: vec![ExportFormat::Txt, ExportFormat::Csv],
        ..ShellSettings::default()
    };

    // 公司客戶：Steel、Diesel、加選 Radar，不加 Comfort，存檔
    let script = "3\n2\n1\n0\ny\n0\n\ny\n\n4\n";
    let (result, output) = run_session(&catalog, storage, settings, script);

    assert!(result.is_ok(), "session failed: {:?}", result);
    assert!(output.contains("Offer for customer type: Company"));
    assert!(output.contains("Offer saved to:"));
    assert!(output.contains(" 12300 EUR\n"));

    let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("offer-") && names[0].ends_with(".csv"));
    assert!(names[1].ends_with(".txt"));

    let csv = std::fs::read_to_string(temp_dir.path().join(&names[0])).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "partition,category,option,price",
            "essential,Hull,Steel,9000",
            "essential,Engine,Diesel,2500",
            "extra,Navigation,Radar,800",
            "total,,,12300",
        ]
    );
}

#[test]
fn test_failed_save_keeps_session_alive() {
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn write_file(&self, _path: &str, _data: &[u8]) -> Result<String> {
            Err(OfferError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    let catalog = catalog();
    let script = "3\n1\n0\n0\n\n\n\n\n4\n";
    let (result, output) = run_session(&catalog, BrokenStorage, ShellSettings::default(), script);

    assert!(result.is_ok());
    assert!(output.contains("read-only"));
    assert!(!output.contains("Offer saved to:"));
}

#[test]
fn test_invalid_utf8_menu_input_reprompts() {
    let catalog = catalog();
    let console = Console::new(Cursor::new(b"\xff\n\n4\n".to_vec()), Vec::new(), false);
    let mut shell = Shell::new(&catalog, console, NoStorage, ShellSettings::default());

    let result = shell.run();
    let output = String::from_utf8(shell.into_terminal().into_writer()).unwrap();

    assert!(result.is_ok());
    assert_eq!(output.matches("Choice (1-4): ").count(), 2);
}

#[test]
fn test_offer_total_overflow_returns_to_menu() {
    let catalog = Catalog {
        essential: vec![
            Category::new("Hull", vec![CatalogOption::new("Gold", u64::MAX)]),
            Category::new("Engine", vec![CatalogOption::new("Fusion", u64::MAX)]),
        ],
        extra: vec![],
    };

    // 總價溢位：回報錯誤，按 ENTER 後回到選單再離開
    let (result, output) = run_session(&catalog, NoStorage, ShellSettings::default(), "3\n1\n0\n0\n\n4\n");

    assert!(result.is_ok());
    assert!(output.contains("exceeds the representable price range"));
    assert!(output.contains("Press [ENTER] to continue."));
    assert_eq!(output.matches("Choice (1-4): ").count(), 2);
}
