use vee::mach::{assemble, disassemble, Program};

const SOURCE: &str = "
    func square(x) { return x * x; }
    n = 0;
    while (n < 3) { print(square(n)); n = n + 1; }
";

#[test]
fn test_listing_round_trip() {
    let listing = vee::compile_listing(SOURCE).unwrap().to_string();
    assert!(listing.contains("\n#func square\n"));
    let program = assemble(&listing).unwrap();
    let expected: String = listing
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| format!("{}\n", line))
        .collect();
    assert_eq!(disassemble(&program), expected);
    let text = program.to_string();
    assert_eq!(text.parse::<Program>().unwrap(), program);
}

#[test]
fn test_deterministic() {
    let a = vee::compile(SOURCE).unwrap();
    let b = vee::compile(SOURCE).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        vee::compile_listing(SOURCE).unwrap().to_string(),
        vee::compile_listing(SOURCE).unwrap().to_string()
    );
}

#[test]
fn test_csv() {
    let program = Program::from_csv("16, 2, 21 ,23").unwrap();
    assert_eq!(program.words(), &[16, 2, 21, 23]);
    assert!(Program::from_csv("16,x").is_err());
}
