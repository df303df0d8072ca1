use dnary_huffman::{DnaryHuffmanBuilder, WeightedSymbolSet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // letter frequencies (per mille) of a few common English letters
    let symbols: WeightedSymbolSet<char> = vec![
        ('e', 127.0),
        ('t', 91.0),
        ('a', 82.0),
        ('o', 75.0),
        ('i', 70.0),
        ('n', 67.0),
        ('s', 63.0),
        ('h', 61.0),
    ]
    .into();

    for radix in [2, 3, 4] {
        let builder = DnaryHuffmanBuilder::new(radix)?;
        let tree = builder.build_tree(&symbols)?;
        let code = tree.generate_table();

        println!("radix {radix}: {} padding leaves, depth {}", tree.padding(), tree.depth());
        for entry in code.sorted() {
            println!("  {}\t{}\t{}", entry.symbol, entry.weight, entry.codeword);
        }
        println!(
            "  average length {:.4} digits, kraft sum {:.4}",
            code.average_length(),
            code.kraft_sum()
        );
    }

    let tree = DnaryHuffmanBuilder::binary().build_tree(&symbols)?;
    print!("{tree}");

    Ok(())
}
