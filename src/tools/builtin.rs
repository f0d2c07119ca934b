use once_cell::sync::Lazy;

use crate::tools::tool::Tool;

struct Seed {
    id: &'static str,
    name: &'static str,
    linux: Option<&'static str>,
    macos: Option<&'static str>,
    windows: Option<&'static str>,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "git",
        name: "Git",
        linux: Some("sudo apt-get install -y git"),
        macos: Some("brew install git"),
        windows: Some("winget install --id Git.Git -e --source winget"),
    },
    Seed {
        id: "nodejs",
        name: "Node.js",
        linux: Some(
            "curl -fsSL https://deb.nodesource.com/setup_lts.x | sudo -E bash - && sudo apt-get install -y nodejs",
        ),
        macos: Some("brew install node"),
        windows: Some("winget install --id OpenJS.NodeJS.LTS -e --source winget"),
    },
    Seed {
        id: "yarn",
        name: "Yarn",
        linux: Some("sudo npm install -g yarn"),
        macos: Some("npm install -g yarn"),
        windows: Some("npm install -g yarn"),
    },
    Seed {
        id: "python",
        name: "Python 3",
        linux: Some("sudo apt-get install -y python3 python3-pip python3-venv"),
        macos: Some("brew install python"),
        windows: Some("winget install --id Python.Python.3.12 -e --source winget"),
    },
    Seed {
        id: "docker",
        name: "Docker",
        linux: Some("curl -fsSL https://get.docker.com | sh"),
        macos: Some("brew install --cask docker"),
        windows: Some("winget install --id Docker.DockerDesktop -e --source winget"),
    },
    Seed {
        id: "vscode",
        name: "Visual Studio Code",
        linux: Some("sudo snap install code --classic"),
        macos: Some("brew install --cask visual-studio-code"),
        windows: Some("winget install --id Microsoft.VisualStudioCode -e --source winget"),
    },
    Seed {
        id: "rust",
        name: "Rust",
        linux: Some("curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y"),
        macos: Some("curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y"),
        windows: Some("winget install --id Rustlang.Rustup -e --source winget"),
    },
    Seed {
        id: "go",
        name: "Go",
        linux: Some("sudo apt-get install -y golang-go"),
        macos: Some("brew install go"),
        windows: Some("winget install --id GoLang.Go -e --source winget"),
    },
    Seed {
        id: "java",
        name: "Java (OpenJDK 21)",
        linux: Some("sudo apt-get install -y openjdk-21-jdk"),
        macos: Some("brew install openjdk@21"),
        windows: Some("winget install --id EclipseAdoptium.Temurin.21.JDK -e --source winget"),
    },
    Seed {
        id: "postgresql",
        name: "PostgreSQL",
        linux: Some("sudo apt-get install -y postgresql postgresql-contrib"),
        macos: Some("brew install postgresql@16"),
        windows: Some("winget install --id PostgreSQL.PostgreSQL.16 -e --source winget"),
    },
    Seed {
        id: "redis",
        name: "Redis",
        linux: Some("sudo apt-get install -y redis-server"),
        macos: Some("brew install redis"),
        windows: None,
    },
    Seed {
        id: "curl",
        name: "cURL",
        linux: Some("sudo apt-get install -y curl"),
        macos: Some("brew install curl"),
        windows: Some("winget install --id cURL.cURL -e --source winget"),
    },
    Seed {
        id: "zsh",
        name: "Zsh",
        linux: Some("sudo apt-get install -y zsh"),
        macos: Some("brew install zsh"),
        windows: None,
    },
    Seed {
        id: "htop",
        name: "htop",
        linux: Some("sudo apt-get install -y htop"),
        macos: Some("brew install htop"),
        windows: None,
    },
    Seed {
        id: "neovim",
        name: "Neovim",
        linux: Some("sudo apt-get install -y neovim"),
        macos: Some("brew install neovim"),
        windows: Some("winget install --id Neovim.Neovim -e --source winget"),
    },
    Seed {
        id: "kubectl",
        name: "kubectl",
        linux: Some("sudo snap install kubectl --classic"),
        macos: Some("brew install kubectl"),
        windows: Some("winget install --id Kubernetes.kubectl -e --source winget"),
    },
    Seed {
        id: "terraform",
        name: "Terraform",
        linux: Some("sudo snap install terraform --classic"),
        macos: Some("brew install hashicorp/tap/terraform"),
        windows: Some("winget install --id Hashicorp.Terraform -e --source winget"),
    },
    Seed {
        id: "postman",
        name: "Postman",
        linux: Some("sudo snap install postman"),
        macos: Some("brew install --cask postman"),
        windows: Some("winget install --id Postman.Postman -e --source winget"),
    },
    Seed {
        id: "build-essential",
        name: "Build Essentials (gcc, make)",
        linux: Some("sudo apt-get install -y build-essential"),
        macos: None,
        windows: None,
    },
    Seed {
        id: "homebrew",
        name: "Homebrew",
        linux: None,
        macos: Some(
            r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#,
        ),
        windows: None,
    },
    Seed {
        id: "xcode-cli",
        name: "Xcode Command Line Tools",
        linux: None,
        macos: Some("xcode-select --install"),
        windows: None,
    },
    Seed {
        id: "wsl",
        name: "Windows Subsystem for Linux",
        linux: None,
        macos: None,
        windows: Some("wsl --install"),
    },
];

static BUILTINS: Lazy<Vec<Tool>> = Lazy::new(|| SEEDS.iter().filter_map(Seed::to_tool).collect());

impl Seed {
    fn to_tool(&self) -> Option<Tool> {
        let mut builder = Tool::builder(self.id, self.name);
        if let Some(command) = self.linux {
            builder = builder.linux(command);
        }
        if let Some(command) = self.macos {
            builder = builder.macos(command);
        }
        if let Some(command) = self.windows {
            builder = builder.windows(command);
        }
        match builder.build() {
            Ok(tool) => Some(tool),
            Err(err) => {
                tracing::warn!(tool = self.id, %err, "invalid built-in tool entry");
                None
            }
        }
    }
}

/// The curated tool table every catalog starts from.
pub fn builtin_tools() -> &'static [Tool] {
    &BUILTINS
}
