use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use distributed_dfs::blocknode::handlers as blocknode_handlers;
use distributed_dfs::blocknode::store::BlockStore;
use distributed_dfs::client::orchestrator::DfsClient;
use distributed_dfs::cluster::roster::Roster;
use distributed_dfs::cluster::types::NodeAddress;
use distributed_dfs::coordinator::catalog::FileCatalog;
use distributed_dfs::coordinator::handlers as coordinator_handlers;
use distributed_dfs::coordinator::placement::DEFAULT_BLOCK_SIZE;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "coordinator" => run_coordinator(&args[2..]).await,
        "node" => run_blocknode(&args[2..]).await,
        "upload" => run_upload(&args[2..]).await,
        "download" => run_download(&args[2..]).await,
        other => {
            eprintln!("Unknown role: {}", other);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

async fn run_coordinator(args: &[String]) -> anyhow::Result<()> {
    let mut bind_addr: Option<SocketAddr> = None;
    let mut nodes: Vec<NodeAddress> = vec![];
    let mut block_size: u64 = DEFAULT_BLOCK_SIZE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--node" => {
                nodes.push(args[i + 1].parse()?);
                i += 2;
            }
            "--block-size" => {
                block_size = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");
    let roster = Arc::new(Roster::new(nodes)?);

    tracing::info!(
        "Coordinator roster: {} nodes, block size {} bytes",
        roster.len(),
        block_size
    );
    for node in roster.nodes() {
        tracing::info!("  - {}", node);
    }

    let catalog = Arc::new(FileCatalog::new(roster, block_size));
    let app = coordinator_handlers::router(catalog);

    tracing::info!("Coordinator listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_blocknode(args: &[String]) -> anyhow::Result<()> {
    let mut bind_addr: Option<SocketAddr> = None;
    let mut storage_root = PathBuf::from("./storage");

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--storage" => {
                storage_root = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");
    let store = Arc::new(BlockStore::open(storage_root.clone()).await?);
    let app = blocknode_handlers::router(store);

    tracing::info!(
        "Block node listening on {}, storage root {}",
        bind_addr,
        storage_root.display()
    );
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_upload(args: &[String]) -> anyhow::Result<()> {
    let (coordinator_url, rest) = parse_coordinator_url(args);
    let mut file: Option<PathBuf> = None;

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--file" => {
                file = Some(PathBuf::from(&rest[i + 1]));
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let file = file.expect("--file is required");
    let client = DfsClient::new(&coordinator_url);
    let response = client.upload(&file).await?;

    println!("{}", response.message);
    for block in &response.blocks_info {
        println!(
            "  block {} [{}..{}) primary {} replica {}",
            block.id,
            block.offset,
            block.offset + block.size,
            block.primary_node,
            block.replica_node
        );
    }

    Ok(())
}

async fn run_download(args: &[String]) -> anyhow::Result<()> {
    let (coordinator_url, rest) = parse_coordinator_url(args);
    let mut file_name: Option<String> = None;
    let mut save_dir = PathBuf::from(".");

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--file" => {
                file_name = Some(rest[i + 1].clone());
                i += 2;
            }
            "--save" => {
                save_dir = PathBuf::from(&rest[i + 1]);
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let file_name = file_name.expect("--file is required");
    let client = DfsClient::new(&coordinator_url);
    let dest_path = client.download(&file_name, &save_dir).await?;

    println!("File {} downloaded to {}", file_name, dest_path.display());

    Ok(())
}

// `--coordinator` wins over the COORDINATOR_URL environment variable.
fn parse_coordinator_url(args: &[String]) -> (String, Vec<String>) {
    let mut url =
        std::env::var("COORDINATOR_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let mut rest = Vec::with_capacity(args.len());

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--coordinator" && i + 1 < args.len() {
            url = args[i + 1].clone();
            i += 2;
        } else {
            rest.push(args[i].clone());
            i += 1;
        }
    }

    (url, rest)
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!(
        "  {} coordinator --bind <addr:port> --node <addr:port> [--node <addr:port> ...] [--block-size <bytes>]",
        program
    );
    eprintln!("  {} node --bind <addr:port> [--storage <dir>]", program);
    eprintln!(
        "  {} upload --file <path> [--coordinator <url>]",
        program
    );
    eprintln!(
        "  {} download --file <name> [--save <dir>] [--coordinator <url>]",
        program
    );
    eprintln!();
    eprintln!("Example: {} coordinator --bind 127.0.0.1:5000 --node 127.0.0.1:5001 --node 127.0.0.1:5002", program);
    eprintln!("Example: {} node --bind 127.0.0.1:5001 --storage ./storage1", program);
}
